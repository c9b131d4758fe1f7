//! Shared key validation for storage backends.

use crate::traits::{StorageError, StorageResult};

/// Reject keys that could escape a backend's namespace.
///
/// Keys map directly onto file names in the local backend, so separators,
/// parent references and hidden names are refused by every backend alike.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if key.contains("..") || key.starts_with('.') || key.contains('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid characters: {}",
            key
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_keys() {
        assert!(validate_key("impact_award_draft").is_ok());
        assert!(validate_key("impact_award_submissions").is_ok());
    }

    #[test]
    fn rejects_traversal_and_separators() {
        for key in ["", "../etc/passwd", "/abs", "a/b", "a\\b", ".hidden"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }
}
