//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use award_core::models;
use award_core::validation;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Impact Award API",
        version = "0.1.0",
        description = "Impact Award nomination form backend: draft autosave, step validation, recommendation submission with receipt numbers, and mail delivery of finished submissions."
    ),
    paths(
        handlers::drafts::get_draft,
        handlers::drafts::save_draft,
        handlers::steps::validate_form_step,
        handlers::recommendations::submit_recommendation,
        handlers::recommendations::list_recommendations,
        handlers::delivery::deliver_submission,
    ),
    components(
        schemas(
            error::ErrorResponse,
            models::RecommendationData,
            models::Submission,
            models::DeliveryResponse,
            validation::StepValidation,
            handlers::drafts::DraftResponse,
            handlers::steps::StepValidationRequest,
            handlers::recommendations::SubmitRecommendationRequest,
            handlers::recommendations::SubmitRecommendationResponse,
            handlers::recommendations::SubmissionRejectedResponse,
            handlers::recommendations::SubmissionListResponse,
        )
    ),
    tags(
        (name = "drafts", description = "Autosaved form draft"),
        (name = "recommendations", description = "Validation and submission of recommendations"),
        (name = "delivery", description = "Mail delivery of recorded submissions")
    )
)]
pub struct ApiDoc;
