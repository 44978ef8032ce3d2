use std::path::PathBuf;

use async_trait::async_trait;
use models::Keyed;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::info;

use super::{first_match, RecordStore};
use crate::errors::ServiceError;

/// JSON file-backed record list.
///
/// Keeps the records in memory and rewrites the whole file after each insert.
/// Intended for small seed-sized datasets where a database is overkill.
pub struct JsonFileStore<T> {
    inner: RwLock<Vec<T>>,
    file_path: PathBuf,
}

impl<T> JsonFileStore<T>
where
    T: Keyed + Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Load the store from a path. Creates the file with an empty list if missing;
    /// an unreadable or malformed file is an error rather than an empty store.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
        }

        let records: Vec<T> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Storage(format!("{}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                fs::write(&file_path, b"[]").await.map_err(ServiceError::storage)?;
                Vec::new()
            }
            Err(e) => return Err(ServiceError::storage(e)),
        };
        for record in &records {
            record.validate()?;
        }
        info!(path = %file_path.display(), records = records.len(), "json store opened");

        Ok(Self { inner: RwLock::new(records), file_path })
    }

    async fn save(&self, records: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(records).map_err(ServiceError::storage)?;
        fs::write(&self.file_path, data).await.map_err(ServiceError::storage)
    }
}

#[async_trait]
impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Keyed + Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
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
        // 持有写锁直到落盘完成，保证文件内容与内存一致
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        next.extend(records);
        self.save(&next).await?;
        *guard = next;
        Ok(())
    }
}
