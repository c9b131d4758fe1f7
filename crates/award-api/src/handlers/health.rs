//! Liveness and readiness probes.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - the submission log is readable.
///
/// Mail configuration is reported but does not affect readiness, since
/// recommendations are recorded locally either way.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.recommendations.store().clone();
    let storage = match tokio::time::timeout(CHECK_TIMEOUT, store.list_submissions()).await {
        Ok(Ok(_)) => "ready".to_string(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Storage readiness check failed");
            format!("not_ready: {}", e)
        }
        Err(_) => {
            tracing::error!("Storage readiness check timed out");
            "timeout".to_string()
        }
    };
    let ready = storage == "ready";

    let mailer = if state.mailer.is_some() && !state.mail_to().is_empty() {
        "configured"
    } else {
        "not_configured"
    };

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "storage": storage,
            "storage_backend": state.recommendations.store().backend_type().to_string(),
            "mailer": mailer,
        })),
    )
}
