//! Validation modules

pub mod evidence;
pub mod recommendation;

pub use evidence::{get_file_extension, validate_evidence_files, EvidenceValidation};
pub use recommendation::{
    validate_recommendation, validate_step, FieldErrors, RecommendationValidation,
    StepValidation, STEP_REQUIRED_MESSAGE,
};
