//! Storage setup and initialization

use anyhow::{Context, Result};
use award_core::Config;
use award_storage::{create_storage, RecommendationStore};
use std::sync::Arc;

/// Open the configured draft and submission store
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn RecommendationStore>> {
    tracing::info!("Initializing storage...");
    let store = create_storage(config)
        .await
        .context("Failed to initialize storage")?;
    tracing::info!(backend = %store.backend_type(), "Storage initialized successfully");
    Ok(store)
}
