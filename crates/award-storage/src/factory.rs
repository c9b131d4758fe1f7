#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{
    JsonRecommendationStore, KeyValueStore, MemoryStorage, RecommendationStore, StorageBackend,
    StorageResult,
};
use award_core::Config;
use std::sync::Arc;

/// Create the recommendation store selected by configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn RecommendationStore>> {
    let backend: Arc<dyn KeyValueStore> = match config.storage_backend() {
        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let storage = LocalStorage::new(config.local_storage_path()).await?;
            tracing::info!(
                path = %config.local_storage_path().display(),
                "Using local file storage"
            );
            Arc::new(storage)
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => {
            return Err(crate::StorageError::ConfigError(
                "Local storage backend not available (storage-local feature not enabled)"
                    .to_string(),
            ))
        }

        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; drafts and submissions are not persisted");
            Arc::new(MemoryStorage::new())
        }
    };

    Ok(Arc::new(JsonRecommendationStore::new(backend)))
}
