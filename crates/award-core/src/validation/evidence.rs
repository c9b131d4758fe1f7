use serde::Serialize;
use utoipa::ToSchema;

use crate::models::EvidenceFile;

/// Outcome of an evidence allow-list check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EvidenceValidation {
    pub valid: bool,
    /// Offending file names, in input order
    pub invalid: Vec<String>,
}

/// Lowercased text after the last `.`, or empty when there is none.
pub fn get_file_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Check every file's extension against `allowed` (case-insensitive).
///
/// The empty extension never matches, even if `allowed` contains an empty entry.
pub fn validate_evidence_files<S: AsRef<str>>(
    files: &[EvidenceFile],
    allowed: &[S],
) -> EvidenceValidation {
    let invalid: Vec<String> = files
        .iter()
        .filter(|file| !is_allowed(&get_file_extension(&file.name), allowed))
        .map(|file| file.display_name().to_string())
        .collect();

    EvidenceValidation {
        valid: invalid.is_empty(),
        invalid,
    }
}

fn is_allowed<S: AsRef<str>>(extension: &str, allowed: &[S]) -> bool {
    !extension.is_empty()
        && allowed
            .iter()
            .any(|candidate| candidate.as_ref().trim().to_lowercase() == extension)
}
