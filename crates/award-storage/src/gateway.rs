//! Draft slot and submission log on top of a key-value backend.

use crate::traits::{KeyValueStore, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use award_core::constants::{DRAFT_KEY, SUBMISSIONS_KEY};
use award_core::{RecommendationData, Submission};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Persistence gateway for the recommendation workflow.
///
/// Has no validation responsibility: drafts are stored as given and
/// submissions are appended as given.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Latest draft, or `None` when the slot is empty or unreadable as a draft
    async fn load_draft(&self) -> StorageResult<Option<RecommendationData>>;

    /// Overwrite the draft slot
    async fn save_draft(&self, draft: &RecommendationData) -> StorageResult<()>;

    /// Empty the draft slot
    async fn clear_draft(&self) -> StorageResult<()>;

    /// Append a submission to the log
    async fn save_submission(&self, submission: &Submission) -> StorageResult<()>;

    /// All submissions, oldest first
    async fn list_submissions(&self) -> StorageResult<Vec<Submission>>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// [`RecommendationStore`] storing JSON values in any [`KeyValueStore`].
pub struct JsonRecommendationStore {
    backend: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write of the submission log.
    log_lock: Mutex<()>,
}

impl JsonRecommendationStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            log_lock: Mutex::new(()),
        }
    }

    async fn read_log(&self) -> StorageResult<Vec<Submission>> {
        match self.backend.get(SUBMISSIONS_KEY).await? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_slice(&raw).map_err(|e| StorageError::Corrupt {
                key: SUBMISSIONS_KEY.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl RecommendationStore for JsonRecommendationStore {
    async fn load_draft(&self) -> StorageResult<Option<RecommendationData>> {
        let Some(raw) = self.backend.get(DRAFT_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_slice(&raw) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                tracing::warn!(key = DRAFT_KEY, error = %e, "Stored draft is unreadable, ignoring it");
                Ok(None)
            }
        }
    }

    async fn save_draft(&self, draft: &RecommendationData) -> StorageResult<()> {
        let raw = serde_json::to_vec(draft)?;
        self.backend.put(DRAFT_KEY, raw).await
    }

    async fn clear_draft(&self) -> StorageResult<()> {
        self.backend.delete(DRAFT_KEY).await
    }

    async fn save_submission(&self, submission: &Submission) -> StorageResult<()> {
        let _guard = self.log_lock.lock().await;

        let mut log = self.read_log().await?;
        log.push(submission.clone());
        let raw = serde_json::to_vec(&log)?;
        self.backend.put(SUBMISSIONS_KEY, raw).await?;

        tracing::info!(
            receipt_number = %submission.receipt_number(),
            log_len = log.len(),
            "Submission appended to log"
        );
        Ok(())
    }

    async fn list_submissions(&self) -> StorageResult<Vec<Submission>> {
        let _guard = self.log_lock.lock().await;
        self.read_log().await
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend.backend_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LocalStorage, MemoryStorage};
    use award_core::EvidenceFile;
    use chrono::Utc;

    fn draft() -> RecommendationData {
        RecommendationData {
            division: "MoonShot".to_string(),
            recommender_name: "김혜린".to_string(),
            reason: "성과 인정".to_string(),
            ..Default::default()
        }
    }

    fn submission(receipt: &str) -> Submission {
        Submission::new(
            draft(),
            &[EvidenceFile::new("report.pdf")],
            receipt.to_string(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn untouched_store_has_no_draft() {
        let store = JsonRecommendationStore::new(Arc::new(MemoryStorage::new()));
        assert_eq!(store.load_draft().await.unwrap(), None);
        assert!(store.list_submissions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn draft_round_trips_and_clears() {
        let store = JsonRecommendationStore::new(Arc::new(MemoryStorage::new()));
        store.save_draft(&draft()).await.unwrap();
        assert_eq!(store.load_draft().await.unwrap(), Some(draft()));

        let newer = RecommendationData {
            nominee_name: "홍길동".to_string(),
            ..draft()
        };
        store.save_draft(&newer).await.unwrap();
        assert_eq!(store.load_draft().await.unwrap(), Some(newer));

        store.clear_draft().await.unwrap();
        assert_eq!(store.load_draft().await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_draft_reads_as_none() {
        let backend = MemoryStorage::new();
        backend.put(DRAFT_KEY, b"{not json".to_vec()).await.unwrap();
        let store = JsonRecommendationStore::new(Arc::new(backend));
        assert_eq!(store.load_draft().await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_draft_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("impact_award_draft.json"), b"\x00garbage{").unwrap();

        let backend = LocalStorage::new(dir.path()).await.unwrap();
        let store = JsonRecommendationStore::new(Arc::new(backend));
        assert_eq!(store.load_draft().await.unwrap(), None);

        store.save_draft(&draft()).await.unwrap();
        assert_eq!(store.load_draft().await.unwrap(), Some(draft()));
    }

    #[tokio::test]
    async fn submissions_append_in_order() {
        let store = JsonRecommendationStore::new(Arc::new(MemoryStorage::new()));
        store.save_submission(&submission("IA-1")).await.unwrap();
        store.save_submission(&submission("IA-2")).await.unwrap();

        let receipts: Vec<String> = store
            .list_submissions()
            .await
            .unwrap()
            .iter()
            .map(|s| s.receipt_number().to_string())
            .collect();
        assert_eq!(receipts, vec!["IA-1", "IA-2"]);
    }

    #[tokio::test]
    async fn corrupt_log_is_not_overwritten() {
        let backend = MemoryStorage::new();
        backend.put(SUBMISSIONS_KEY, b"oops".to_vec()).await.unwrap();
        let store = JsonRecommendationStore::new(Arc::new(backend.clone()));

        let result = store.save_submission(&submission("IA-1")).await;
        assert!(matches!(result, Err(StorageError::Corrupt { .. })));
        assert_eq!(
            backend.get(SUBMISSIONS_KEY).await.unwrap(),
            Some(b"oops".to_vec())
        );
    }

    #[tokio::test]
    async fn local_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let backend = LocalStorage::new(dir.path()).await.unwrap();
            let store = JsonRecommendationStore::new(Arc::new(backend));
            store.save_draft(&draft()).await.unwrap();
            store.save_submission(&submission("IA-1")).await.unwrap();
        }

        let backend = LocalStorage::new(dir.path()).await.unwrap();
        let store = JsonRecommendationStore::new(Arc::new(backend));
        assert_eq!(store.load_draft().await.unwrap(), Some(draft()));
        assert_eq!(store.list_submissions().await.unwrap().len(), 1);
        assert_eq!(store.backend_type(), StorageBackend::Local);
    }
}
