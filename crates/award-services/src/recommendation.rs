//! Recommendation submission workflow.

use award_core::constants::DEFAULT_ALLOWED_EXTENSIONS;
use award_core::validation::{validate_evidence_files, validate_recommendation, FieldErrors};
use award_core::{issue_receipt_number, Config, EvidenceFile, RecommendationData, Submission};
use award_storage::{RecommendationStore, StorageError, StorageResult};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub receipt_number: String,
    pub submission: Submission,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Recommendation is missing {} required field(s)", .0.len())]
    InvalidFields(FieldErrors),

    #[error("Evidence files have disallowed extensions: {}", .0.join(", "))]
    InvalidEvidence(Vec<String>),

    #[error("Failed to record submission: {0}")]
    Storage(#[from] StorageError),
}

impl SubmissionError {
    /// Field-keyed error map for validation failures.
    ///
    /// Missing fields map to their messages; rejected evidence maps under
    /// `evidence_files` to the offending names. `None` for storage failures.
    pub fn errors(&self) -> Option<serde_json::Value> {
        match self {
            SubmissionError::InvalidFields(errors) => serde_json::to_value(errors).ok(),
            SubmissionError::InvalidEvidence(invalid) => {
                Some(serde_json::json!({ "evidence_files": invalid }))
            }
            SubmissionError::Storage(_) => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        !matches!(self, SubmissionError::Storage(_))
    }
}

/// Coordinates validation, receipt issuance and persistence.
///
/// Does no network I/O. Delivery of a finished submission is the caller's
/// job, see [`crate::DeliveryClient`].
#[derive(Clone)]
pub struct RecommendationService {
    store: Arc<dyn RecommendationStore>,
    allowed_extensions: Vec<String>,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn RecommendationStore>, allowed_extensions: Vec<String>) -> Self {
        Self {
            store,
            allowed_extensions,
        }
    }

    /// Service accepting the default `pdf`, `png` and `jpg` evidence
    pub fn with_default_extensions(store: Arc<dyn RecommendationStore>) -> Self {
        Self::new(
            store,
            DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        )
    }

    pub fn from_config(store: Arc<dyn RecommendationStore>, config: &Config) -> Self {
        Self::new(store, config.evidence_allowed_extensions().to_vec())
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn store(&self) -> &Arc<dyn RecommendationStore> {
        &self.store
    }

    /// Latest draft. Unreadable or missing drafts come back as `None`.
    pub async fn load_draft(&self) -> Option<RecommendationData> {
        match self.store.load_draft().await {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read draft, starting from an empty form");
                None
            }
        }
    }

    /// Overwrite the draft slot. Drafts are never validated.
    pub async fn save_draft(&self, draft: &RecommendationData) -> StorageResult<()> {
        self.store.save_draft(draft).await
    }

    /// Validate, issue a receipt, append to the log and clear the draft.
    ///
    /// Validation failures leave storage untouched. If the append fails the
    /// draft is kept. A failed draft clear after a successful append is only
    /// logged, since the submission is already recorded.
    pub async fn submit_recommendation(
        &self,
        data: RecommendationData,
        files: &[EvidenceFile],
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let validation = validate_recommendation(&data);
        if !validation.valid {
            tracing::debug!(
                missing = validation.errors.len(),
                "Recommendation rejected: required fields missing"
            );
            return Err(SubmissionError::InvalidFields(validation.errors));
        }

        let evidence = validate_evidence_files(files, self.allowed_extensions.as_slice());
        if !evidence.valid {
            tracing::debug!(
                invalid = ?evidence.invalid,
                "Recommendation rejected: evidence extension not allowed"
            );
            return Err(SubmissionError::InvalidEvidence(evidence.invalid));
        }

        let receipt_number = issue_receipt_number();
        let submission = Submission::new(data, files, receipt_number.clone(), Utc::now());

        self.store.save_submission(&submission).await?;

        if let Err(e) = self.store.clear_draft().await {
            tracing::warn!(
                receipt_number = %receipt_number,
                error = %e,
                "Submission recorded but the draft could not be cleared"
            );
        }

        tracing::info!(
            receipt_number = %receipt_number,
            division = %submission.data().division,
            evidence_count = submission.evidence_files().len(),
            "Recommendation submitted"
        );

        Ok(SubmissionReceipt {
            receipt_number,
            submission,
        })
    }

    /// Every recorded submission, oldest first
    pub async fn list_submissions(&self) -> StorageResult<Vec<Submission>> {
        self.store.list_submissions().await
    }
}
