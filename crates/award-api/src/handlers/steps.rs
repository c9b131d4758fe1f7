use crate::error::{ErrorResponse, ValidatedJson};
use award_core::validation::{validate_step, StepValidation};
use award_core::{EvidenceFile, RecommendationData};
use axum::{extract::Path, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StepValidationRequest {
    #[serde(default)]
    pub data: RecommendationData,
    /// Names of the attached evidence files
    #[serde(default)]
    pub evidence_files: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/api/steps/{index}/validate",
    tag = "recommendations",
    params(
        ("index" = usize, Path, description = "Zero-based form step")
    ),
    request_body = StepValidationRequest,
    responses(
        (status = 200, description = "Step validation result", body = StepValidation),
        (status = 400, description = "Body is not a step request", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(request))]
pub async fn validate_form_step(
    Path(index): Path<usize>,
    ValidatedJson(request): ValidatedJson<StepValidationRequest>,
) -> impl IntoResponse {
    let files: Vec<EvidenceFile> = request
        .evidence_files
        .into_iter()
        .map(EvidenceFile::from)
        .collect();
    Json(validate_step(index, &request.data, &files))
}
