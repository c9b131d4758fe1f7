//! Receipt numbers handed out for accepted submissions.
//!
//! Format: `IA-YYYYMMDD-HHMMSS-RRRR`, built from the wall-clock time of the
//! submission plus a four digit random suffix. Two submissions in the same
//! second collide with probability 1/10000, which is acceptable for a
//! human-reviewed, low-volume form. Not suitable as a security token.

use chrono::{Local, NaiveDateTime};

use crate::constants::RECEIPT_PREFIX;

const SUFFIX_RANGE: f64 = 10_000.0;

/// Build a receipt number from a timestamp and a random source on `[0, 1)`.
///
/// The suffix is `floor(random() * 10000)`, clamped to `0..=9999` so a
/// misbehaving source cannot widen it past four digits.
pub fn create_receipt_number(at: NaiveDateTime, random: impl FnOnce() -> f64) -> String {
    let suffix = (random() * SUFFIX_RANGE).floor().clamp(0.0, SUFFIX_RANGE - 1.0) as u32;
    format!(
        "{}-{}-{:04}",
        RECEIPT_PREFIX,
        at.format("%Y%m%d-%H%M%S"),
        suffix
    )
}

/// Receipt number for "now" in local time with thread-local randomness.
pub fn issue_receipt_number() -> String {
    create_receipt_number(Local::now().naive_local(), rand::random::<f64>)
}
