use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use award_core::{AppError, EvidenceFile, RecommendationData, Submission};
use award_services::SubmissionError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitRecommendationRequest {
    #[serde(flatten)]
    pub data: RecommendationData,
    /// Names of the attached evidence files
    #[serde(default)]
    pub evidence_files: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitRecommendationResponse {
    pub ok: bool,
    pub receipt_number: String,
    pub submission: Submission,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionRejectedResponse {
    pub ok: bool,
    /// Field key to message, or `evidence_files` to the rejected file names
    #[schema(value_type = Object)]
    pub errors: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionListResponse {
    pub submissions: Vec<Submission>,
    pub total: usize,
}

#[utoipa::path(
    post,
    path = "/api/recommendations",
    tag = "recommendations",
    request_body = SubmitRecommendationRequest,
    responses(
        (status = 201, description = "Recommendation recorded", body = SubmitRecommendationResponse),
        (status = 400, description = "Body is not a recommendation", body = ErrorResponse),
        (status = 422, description = "Missing fields or disallowed evidence", body = SubmissionRejectedResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(receipt_number = tracing::field::Empty))]
pub async fn submit_recommendation(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<SubmitRecommendationRequest>,
) -> Result<Response, HttpAppError> {
    let files: Vec<EvidenceFile> = request
        .evidence_files
        .into_iter()
        .map(EvidenceFile::from)
        .collect();

    match state
        .recommendations
        .submit_recommendation(request.data, &files)
        .await
    {
        Ok(receipt) => {
            tracing::Span::current().record("receipt_number", receipt.receipt_number.as_str());
            Ok((
                StatusCode::CREATED,
                Json(SubmitRecommendationResponse {
                    ok: true,
                    receipt_number: receipt.receipt_number,
                    submission: receipt.submission,
                }),
            )
                .into_response())
        }
        Err(SubmissionError::Storage(e)) => {
            tracing::error!(error = %e, "Failed to record recommendation");
            Err(HttpAppError::from(e))
        }
        Err(rejected) => {
            let errors = rejected.errors().ok_or_else(|| {
                AppError::Internal("Validation failure without field errors".to_string())
            })?;
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(SubmissionRejectedResponse { ok: false, errors }),
            )
                .into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recommendations",
    tag = "recommendations",
    responses(
        (status = 200, description = "Submission log, oldest first", body = SubmissionListResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_recommendations(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let submissions = state.recommendations.list_submissions().await?;
    let total = submissions.len();
    Ok(Json(SubmissionListResponse { submissions, total }))
}
