//! Service layer for the customer directory and the rental catalog.
//! - Record stores are injected as `Arc<dyn RecordStore<T>>`.
//! - The catalog reaches the directory only through `DirectoryClient`.

pub mod errors;
pub mod storage;
pub mod seeding;
pub mod directory;
pub mod directory_client;
pub mod catalog;
