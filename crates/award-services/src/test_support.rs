//! Store double that counts calls and can be told to fail.

use async_trait::async_trait;
use award_core::{RecommendationData, Submission};
use award_storage::{
    JsonRecommendationStore, MemoryStorage, RecommendationStore, StorageBackend, StorageError,
    StorageResult,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub struct RecordingStore {
    inner: JsonRecommendationStore,
    pub draft_saves: AtomicUsize,
    pub draft_clears: AtomicUsize,
    pub appends: AtomicUsize,
    pub fail_append: AtomicBool,
    pub fail_clear: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: JsonRecommendationStore::new(Arc::new(MemoryStorage::new())),
            draft_saves: AtomicUsize::new(0),
            draft_clears: AtomicUsize::new(0),
            appends: AtomicUsize::new(0),
            fail_append: AtomicBool::new(false),
            fail_clear: AtomicBool::new(false),
        })
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecommendationStore for RecordingStore {
    async fn load_draft(&self) -> StorageResult<Option<RecommendationData>> {
        self.inner.load_draft().await
    }

    async fn save_draft(&self, draft: &RecommendationData) -> StorageResult<()> {
        self.draft_saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_draft(draft).await
    }

    async fn clear_draft(&self) -> StorageResult<()> {
        self.draft_clears.fetch_add(1, Ordering::SeqCst);
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(StorageError::DeleteFailed("simulated".to_string()));
        }
        self.inner.clear_draft().await
    }

    async fn save_submission(&self, submission: &Submission) -> StorageResult<()> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        if self.fail_append.load(Ordering::SeqCst) {
            return Err(StorageError::WriteFailed("simulated".to_string()));
        }
        self.inner.save_submission(submission).await
    }

    async fn list_submissions(&self) -> StorageResult<Vec<Submission>> {
        self.inner.list_submissions().await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

/// A recommendation with every required field filled in.
pub fn complete_recommendation() -> RecommendationData {
    RecommendationData {
        division: "MoonShot".to_string(),
        recommender_name: "김혜린".to_string(),
        recommender_dept: "전략기획팀".to_string(),
        recommender_email: "hyerin@example.com".to_string(),
        nominee_name: "홍길동".to_string(),
        nominee_dept: "연구개발팀".to_string(),
        reason: "신규 플랫폼 출시를 주도".to_string(),
        achievement: "출시 3개월 만에 사용자 2배 증가".to_string(),
    }
}
