//! Storage abstractions for service layer
//!
//! A `RecordStore` holds one kind of keyed record in insertion order. Services
//! receive it as `Arc<dyn RecordStore<T>>`, so the in-memory and the JSON file
//! backends are interchangeable.

use async_trait::async_trait;
use models::Keyed;

use crate::errors::ServiceError;

pub mod memory_store;
pub mod json_file_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

#[async_trait]
pub trait RecordStore<T: Keyed>: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<T>, ServiceError>;
    /// First record whose key equals `key` exactly (case-sensitive).
    async fn find(&self, key: &str) -> Result<Option<T>, ServiceError>;
    async fn count(&self) -> Result<usize, ServiceError>;
    /// Append records. Duplicate keys are kept; `find` returns the earliest.
    async fn insert_all(&self, records: Vec<T>) -> Result<(), ServiceError>;
}

pub(crate) fn first_match<'a, T: Keyed>(records: &'a [T], key: &str) -> Option<&'a T> {
    records.iter().find(|r| r.key() == key)
}
