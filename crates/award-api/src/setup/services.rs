//! Service wiring

use crate::services::email::{EmailService, Mailer};
use crate::state::AppState;
use anyhow::Result;
use award_core::Config;
use award_services::RecommendationService;
use award_storage::RecommendationStore;
use std::sync::Arc;

/// Build the application state from configuration and an opened store
pub fn initialize_services(
    config: &Config,
    store: Arc<dyn RecommendationStore>,
) -> Result<Arc<AppState>> {
    let recommendations = RecommendationService::from_config(store, config);
    tracing::info!(
        allowed_extensions = %recommendations.allowed_extensions().join(","),
        "Recommendation service initialized"
    );

    let mailer = EmailService::from_config(config).map(|service| Arc::new(service) as Arc<dyn Mailer>);
    if mailer.is_none() {
        tracing::warn!("Mail delivery disabled; POST /api/submit will answer 503");
    }

    Ok(Arc::new(AppState::new(
        config.clone(),
        recommendations,
        mailer,
    )))
}
