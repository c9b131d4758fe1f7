//! Shared constants

/// Evidence file extensions accepted when nothing else is configured.
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "png", "jpg"];

/// Prefix of every receipt number.
pub const RECEIPT_PREFIX: &str = "IA";

/// Index of the last form step (evidence upload and review).
pub const FINAL_STEP_INDEX: usize = 4;

/// Name reported for an evidence file that arrived without a name.
pub const UNKNOWN_FILE_NAME: &str = "unknown";

/// Storage key of the single draft slot.
pub const DRAFT_KEY: &str = "impact_award_draft";

/// Storage key of the append-only submission log.
pub const SUBMISSIONS_KEY: &str = "impact_award_submissions";
