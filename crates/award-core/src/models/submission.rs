use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::recommendation::{EvidenceFile, RecommendationData};

/// A finalized recommendation.
///
/// Only built after full validation passed. Fields are private so a
/// submission cannot change once it has a receipt number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    #[serde(flatten)]
    data: RecommendationData,
    #[serde(default)]
    evidence_files: Vec<String>,
    receipt_number: String,
    submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(
        data: RecommendationData,
        files: &[EvidenceFile],
        receipt_number: String,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            data,
            evidence_files: files
                .iter()
                .map(|file| file.display_name().to_string())
                .collect(),
            receipt_number,
            submitted_at,
        }
    }

    pub fn data(&self) -> &RecommendationData {
        &self.data
    }

    pub fn evidence_files(&self) -> &[String] {
        &self.evidence_files
    }

    pub fn receipt_number(&self) -> &str {
        &self.receipt_number
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}
