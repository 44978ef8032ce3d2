use std::sync::Arc;

use common::metrics::DIRECTORY_ADDRESS_LOOKUPS_TOTAL;
use models::customer::Customer;
use tracing::debug;

use crate::errors::ServiceError;
use crate::storage::RecordStore;

/// Body returned by an address lookup that matched nobody. Sent with a 200 status.
pub const CUSTOMER_NOT_FOUND: &str = "Customer not found";

/// Customer directory: read-only queries over the seeded customer list.
#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<dyn RecordStore<Customer>>,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn RecordStore<Customer>>) -> Self { Self { store } }

    pub async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        self.store.list().await
    }

    /// Address of the first customer named exactly `name`, or [`CUSTOMER_NOT_FOUND`].
    pub async fn find_address(&self, name: &str) -> Result<String, ServiceError> {
        let found = self.store.find(name).await?;
        let outcome = if found.is_some() { "found" } else { "not_found" };
        DIRECTORY_ADDRESS_LOOKUPS_TOTAL.with_label_values(&[outcome]).inc();
        debug!(%name, outcome, "address lookup");
        Ok(found
            .map(|c| c.address)
            .unwrap_or_else(|| CUSTOMER_NOT_FOUND.to_string()))
    }
}
