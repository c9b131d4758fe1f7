use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use utoipa::ToSchema;

use super::evidence::validate_evidence_files;
use crate::constants::{DEFAULT_ALLOWED_EXTENSIONS, FINAL_STEP_INDEX};
use crate::models::{EvidenceFile, RecommendationData, RequiredField};

/// Generic message for a step with an empty required field.
pub const STEP_REQUIRED_MESSAGE: &str = "필수 항목을 입력해주세요.";

const REQUIRED_BY_STEP: [&[RequiredField]; FINAL_STEP_INDEX + 1] = [
    &[RequiredField::Division],
    &[RequiredField::RecommenderName, RequiredField::RecommenderDept],
    &[RequiredField::NomineeName, RequiredField::NomineeDept],
    &[RequiredField::Reason, RequiredField::Achievement],
    &[],
];

/// Outcome of validating a single form step.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, ToSchema)]
pub struct StepValidation {
    pub valid: bool,
    /// Empty when the step is valid
    pub message: String,
}

impl StepValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Missing-field messages keyed by field, ordered as the form is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<RequiredField, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: RequiredField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: RequiredField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RequiredField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, message) in &self.0 {
            map.serialize_entry(field.key(), message)?;
        }
        map.end()
    }
}

/// Outcome of full-form validation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RecommendationValidation {
    pub valid: bool,
    pub errors: FieldErrors,
}

/// Validate the fields required by one step.
///
/// Step indices past the final step require nothing. The final step also
/// checks evidence files against the default allow-list.
pub fn validate_step(
    step_index: usize,
    data: &RecommendationData,
    files: &[EvidenceFile],
) -> StepValidation {
    let required = REQUIRED_BY_STEP.get(step_index).copied().unwrap_or(&[]);
    if required.iter().any(|field| !data.is_filled(*field)) {
        return StepValidation::fail(STEP_REQUIRED_MESSAGE);
    }

    if step_index == FINAL_STEP_INDEX {
        let evidence = validate_evidence_files(files, &DEFAULT_ALLOWED_EXTENSIONS);
        if !evidence.valid {
            return StepValidation::fail(format!(
                "허용되지 않은 파일 형식: {}",
                evidence.invalid.join(", ")
            ));
        }
    }

    StepValidation::ok()
}

/// Validate every required field of the form.
pub fn validate_recommendation(data: &RecommendationData) -> RecommendationValidation {
    let errors = FieldErrors(
        RequiredField::ALL
            .iter()
            .filter(|field| !data.is_filled(**field))
            .map(|field| (*field, field.missing_message()))
            .collect(),
    );

    RecommendationValidation {
        valid: errors.is_empty(),
        errors,
    }
}
