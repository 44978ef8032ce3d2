use async_trait::async_trait;
use models::Keyed;
use tokio::sync::RwLock;

use super::{first_match, RecordStore};
use crate::errors::ServiceError;

/// Process-local store; contents vanish on exit.
pub struct MemoryStore<T> {
    inner: RwLock<Vec<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self { Self { inner: RwLock::new(Vec::new()) } }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl<T> RecordStore<T> for MemoryStore<T>
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    async fn list(&self) -> Result<Vec<T>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn find(&self, key: &str) -> Result<Option<T>, ServiceError> {
        let records = self.inner.read().await;
        Ok(first_match(&records, key).cloned())
    }

    async fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.inner.read().await.len())
    }

    async fn insert_all(&self, records: Vec<T>) -> Result<(), ServiceError> {
        self.inner.write().await.extend(records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::customer::Customer;

    #[tokio::test]
    async fn keeps_insertion_order_and_first_match_wins() -> Result<(), anyhow::Error> {
        let store = MemoryStore::<Customer>::new();
        assert_eq!(store.count().await?, 0);

        store
            .insert_all(vec![
                Customer::new("Jean Dupont", "first"),
                Customer::new("Marie Martin", "Lyon"),
                Customer::new("Jean Dupont", "second"),
            ])
            .await?;

        let names: Vec<_> = store.list().await?.into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Jean Dupont", "Marie Martin", "Jean Dupont"]);
        assert_eq!(store.find("Jean Dupont").await?.unwrap().address, "first");
        assert!(store.find("jean dupont").await?.is_none());
        assert_eq!(store.count().await?, 3);
        Ok(())
    }
}
