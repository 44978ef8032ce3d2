use std::sync::Arc;

use models::car::Car;

use crate::directory_client::{DirectoryClient, DirectoryClientError};
use crate::errors::ServiceError;
use crate::storage::RecordStore;

/// Rental catalog: lists cars and forwards address lookups to the directory.
#[derive(Clone)]
pub struct CatalogService {
    cars: Arc<dyn RecordStore<Car>>,
    directory: Arc<dyn DirectoryClient>,
}

impl CatalogService {
    pub fn new(cars: Arc<dyn RecordStore<Car>>, directory: Arc<dyn DirectoryClient>) -> Self {
        Self { cars, directory }
    }

    pub async fn list(&self) -> Result<Vec<Car>, ServiceError> {
        self.cars.list().await
    }

    /// Whatever the directory answers, sentinel included. Failures are not retried.
    pub async fn lookup_customer_address(&self, name: &str) -> Result<String, DirectoryClientError> {
        self.directory.resolve_address(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::CUSTOMER_NOT_FOUND;
    use crate::seeding::ensure_seeded;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl DirectoryClient for RecordingClient {
        async fn resolve_address(&self, name: &str) -> Result<String, DirectoryClientError> {
            self.calls.lock().unwrap().push(name.to_string());
            if self.fail {
                return Err(DirectoryClientError::Transport("connection refused".into()));
            }
            Ok(CUSTOMER_NOT_FOUND.to_string())
        }
    }

    async fn catalog(client: Arc<RecordingClient>) -> Result<CatalogService, anyhow::Error> {
        let cars = Arc::new(MemoryStore::<Car>::new());
        ensure_seeded(cars.as_ref(), models::car::seed()).await?;
        Ok(CatalogService::new(cars, client))
    }

    #[tokio::test]
    async fn lists_seeded_cars() -> Result<(), anyhow::Error> {
        let svc = catalog(Arc::new(RecordingClient::default())).await?;
        let cars = svc.list().await?;
        assert_eq!(cars.len(), 5);
        assert_eq!(cars[0], Car::new("AA-123-BB", "Renault", 45.0));
        Ok(())
    }

    #[tokio::test]
    async fn one_call_per_lookup_and_sentinel_passes_through() -> Result<(), anyhow::Error> {
        let client = Arc::new(RecordingClient::default());
        let svc = catalog(client.clone()).await?;
        assert_eq!(svc.lookup_customer_address("Nobody").await?, CUSTOMER_NOT_FOUND);
        assert_eq!(*client.calls.lock().unwrap(), ["Nobody"]);
        Ok(())
    }

    #[tokio::test]
    async fn failures_propagate_without_retry() -> Result<(), anyhow::Error> {
        let client = Arc::new(RecordingClient { fail: true, ..Default::default() });
        let svc = catalog(client.clone()).await?;
        assert!(svc.lookup_customer_address("Jean Dupont").await.is_err());
        assert_eq!(client.calls.lock().unwrap().len(), 1);
        Ok(())
    }
}
