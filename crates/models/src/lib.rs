//! Record types shared by the customer directory and the rental catalog.

pub mod errors;
pub mod customer;
pub mod car;

/// A record addressed by a natural string key.
pub trait Keyed {
    fn key(&self) -> &str;

    /// Checked when records enter a store at boot; request paths stay unvalidated.
    fn validate(&self) -> Result<(), errors::ModelError> { Ok(()) }
}
