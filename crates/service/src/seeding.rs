use models::Keyed;
use tracing::info;

use crate::errors::ServiceError;
use crate::storage::RecordStore;

/// Load `seed` into `store` if and only if the store is empty.
///
/// Returns the number of records inserted; 0 means the store was already populated
/// (e.g. a JSON file kept from a previous run) and was left untouched.
pub async fn ensure_seeded<T, S>(store: &S, seed: Vec<T>) -> Result<usize, ServiceError>
where
    T: Keyed + Send + 'static,
    S: RecordStore<T> + ?Sized,
{
    let existing = store.count().await?;
    if existing > 0 {
        info!(existing, event = "seed_skipped", "store already seeded");
        return Ok(0);
    }
    for record in &seed {
        record.validate()?;
    }
    let inserted = seed.len();
    store.insert_all(seed).await?;
    info!(inserted, event = "seeded", "seed data loaded");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use models::customer::{self, Customer};

    #[tokio::test]
    async fn seeds_once() -> Result<(), anyhow::Error> {
        let store = MemoryStore::<Customer>::new();
        assert_eq!(ensure_seeded(&store, customer::seed()).await?, 5);
        assert_eq!(ensure_seeded(&store, customer::seed()).await?, 0);
        assert_eq!(store.count().await?, 5);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_seed_is_rejected_before_insert() -> Result<(), anyhow::Error> {
        let store = MemoryStore::<Customer>::new();
        let res = ensure_seeded(&store, vec![Customer::new("ok", "a"), Customer::new("", "b")]).await;
        assert!(matches!(res, Err(ServiceError::Model(_))));
        assert_eq!(store.count().await?, 0);
        Ok(())
    }
}
