//! Configuration validation
//!
//! Catches misconfiguration at startup instead of on the first submission.

use anyhow::Result;
use award_core::{Config, StorageBackend};

/// Validate configuration before anything is opened.
///
/// Hard errors come from [`Config::validate`]. Settings that only degrade
/// the service, such as an empty `MAIL_TO`, are logged.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.storage_backend() == StorageBackend::Memory {
        tracing::warn!("In-memory storage in production - submissions are lost on restart");
    }

    if config.mail_to().is_empty() {
        tracing::warn!("MAIL_TO is empty - submissions cannot be delivered by mail");
    }

    Ok(())
}
