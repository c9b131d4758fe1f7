//! Application state shared by handlers.

use crate::services::email::Mailer;
use award_core::Config;
use award_services::RecommendationService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub recommendations: RecommendationService,
    /// `None` when SMTP is not configured; the delivery endpoint answers 503.
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    pub fn new(
        config: Config,
        recommendations: RecommendationService,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> Self {
        Self {
            config,
            recommendations,
            mailer,
        }
    }

    /// Recipients of submission notices
    pub fn mail_to(&self) -> &[String] {
        self.config.mail_to()
    }
}
