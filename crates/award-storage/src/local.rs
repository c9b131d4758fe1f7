use crate::keys::validate_key;
use crate::traits::{KeyValueStore, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Local filesystem storage: one JSON file per key under `base_path`.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance, creating `base_path` if needed
    ///
    /// # Arguments
    /// * `base_path` - Root directory for stored values (e.g., "/var/lib/impact-award")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

async fn write_synced(path: &Path, value: &[u8]) -> StorageResult<()> {
    let mut file = fs::File::create(path).await.map_err(|e| {
        StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
    })?;

    file.write_all(value).await.map_err(|e| {
        StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
    })?;

    file.sync_all().await.map_err(|e| {
        StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
    })
}

#[async_trait]
impl KeyValueStore for LocalStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let path = self.key_to_path(key)?;

        match fs::read(&path).await {
            Ok(data) => {
                tracing::debug!(
                    path = %path.display(),
                    key = %key,
                    size_bytes = data.len(),
                    "Local storage read successful"
                );
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        // Each write gets its own temp file; rename replaces the target atomically.
        let tmp_path = self
            .base_path
            .join(format!(".{}.{}.tmp", key, Uuid::new_v4()));
        let size = value.len();
        let start = std::time::Instant::now();

        if let Err(e) = write_synced(&tmp_path, &value).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::WriteFailed(format!(
                "Failed to move {} into place: {}",
                path.display(),
                e
            )));
        }

        tracing::debug!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), key = %key, "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
