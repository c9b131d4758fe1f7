use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::UNKNOWN_FILE_NAME;

/// Form state of a recommendation.
///
/// Drafts may be partially filled, so every field defaults to an empty string
/// and nothing here is validated on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct RecommendationData {
    /// Award category, e.g. `MoonShot`
    pub division: String,
    pub recommender_name: String,
    pub recommender_dept: String,
    /// Optional contact address of the recommender
    pub recommender_email: String,
    pub nominee_name: String,
    pub nominee_dept: String,
    pub reason: String,
    pub achievement: String,
}

/// Fields that must be filled before a recommendation can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequiredField {
    Division,
    RecommenderName,
    RecommenderDept,
    NomineeName,
    NomineeDept,
    Reason,
    Achievement,
}

impl RequiredField {
    /// All required fields in form order.
    pub const ALL: [RequiredField; 7] = [
        RequiredField::Division,
        RequiredField::RecommenderName,
        RequiredField::RecommenderDept,
        RequiredField::NomineeName,
        RequiredField::NomineeDept,
        RequiredField::Reason,
        RequiredField::Achievement,
    ];

    /// Wire name of the field.
    pub fn key(self) -> &'static str {
        match self {
            RequiredField::Division => "division",
            RequiredField::RecommenderName => "recommender_name",
            RequiredField::RecommenderDept => "recommender_dept",
            RequiredField::NomineeName => "nominee_name",
            RequiredField::NomineeDept => "nominee_dept",
            RequiredField::Reason => "reason",
            RequiredField::Achievement => "achievement",
        }
    }

    /// Message shown next to the field when it is left empty.
    pub fn missing_message(self) -> &'static str {
        match self {
            RequiredField::Division => "부문을 선택하세요.",
            RequiredField::RecommenderName => "추천자 이름을 입력하세요.",
            RequiredField::RecommenderDept => "추천자 부서를 입력하세요.",
            RequiredField::NomineeName => "후보자 이름을 입력하세요.",
            RequiredField::NomineeDept => "후보자 부서를 입력하세요.",
            RequiredField::Reason => "추천 사유를 입력하세요.",
            RequiredField::Achievement => "활동 내용을 입력하세요.",
        }
    }
}

impl RecommendationData {
    /// Value of a required field.
    pub fn value(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::Division => &self.division,
            RequiredField::RecommenderName => &self.recommender_name,
            RequiredField::RecommenderDept => &self.recommender_dept,
            RequiredField::NomineeName => &self.nominee_name,
            RequiredField::NomineeDept => &self.nominee_dept,
            RequiredField::Reason => &self.reason,
            RequiredField::Achievement => &self.achievement,
        }
    }

    /// Whether a required field counts as filled (whitespace alone does not).
    pub fn is_filled(&self, field: RequiredField) -> bool {
        !self.value(field).trim().is_empty()
    }
}

/// A user-attached evidence file. Only the name is inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EvidenceFile {
    #[serde(default)]
    pub name: String,
}

impl EvidenceFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name used in reports and submissions; empty names become `unknown`.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNKNOWN_FILE_NAME
        } else {
            &self.name
        }
    }
}

impl From<&str> for EvidenceFile {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for EvidenceFile {
    fn from(name: String) -> Self {
        Self { name }
    }
}
