use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use award_core::RecommendationData;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct DraftResponse {
    /// Saved draft, or `null` when there is none
    pub draft: Option<RecommendationData>,
}

#[utoipa::path(
    get,
    path = "/api/draft",
    tag = "drafts",
    responses(
        (status = 200, description = "Current draft, null when none is saved", body = DraftResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_draft(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let draft = state.recommendations.load_draft().await;
    Json(DraftResponse { draft })
}

#[utoipa::path(
    put,
    path = "/api/draft",
    tag = "drafts",
    request_body = RecommendationData,
    responses(
        (status = 204, description = "Draft saved"),
        (status = 400, description = "Body is not a recommendation", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, draft))]
pub async fn save_draft(
    State(state): State<Arc<AppState>>,
    ValidatedJson(draft): ValidatedJson<RecommendationData>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.recommendations.save_draft(&draft).await?;
    tracing::debug!("Draft saved");
    Ok(StatusCode::NO_CONTENT)
}
