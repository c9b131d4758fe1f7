//! Delivery endpoint: turns a recorded submission into an email.

use crate::constants::MALFORMED_SUBMISSION_MESSAGE;
use crate::state::AppState;
use award_core::{build_email, AppError, DeliveryResponse, ErrorMetadata, Submission};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

fn reply(status: StatusCode, body: DeliveryResponse) -> (StatusCode, Json<DeliveryResponse>) {
    (status, Json(body))
}

fn reply_error(error: AppError) -> (StatusCode, Json<DeliveryResponse>) {
    let status =
        StatusCode::from_u16(error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    reply(status, DeliveryResponse::rejected(error.client_message()))
}

#[utoipa::path(
    post,
    path = "/api/submit",
    tag = "delivery",
    request_body = Submission,
    responses(
        (status = 200, description = "Mail accepted by the SMTP relay", body = DeliveryResponse),
        (status = 400, description = "Body is not a submission", body = DeliveryResponse),
        (status = 502, description = "SMTP relay rejected the message", body = DeliveryResponse),
        (status = 503, description = "Mail delivery is not configured", body = DeliveryResponse)
    )
)]
#[tracing::instrument(skip(state, payload), fields(receipt_number = tracing::field::Empty))]
pub async fn deliver_submission(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Submission>, JsonRejection>,
) -> impl IntoResponse {
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Malformed submission body");
            return reply(
                StatusCode::BAD_REQUEST,
                DeliveryResponse::rejected(MALFORMED_SUBMISSION_MESSAGE),
            );
        }
    };
    tracing::Span::current().record("receipt_number", submission.receipt_number());

    let Some(mailer) = state.mailer.as_ref() else {
        tracing::warn!("Delivery requested but SMTP is not configured");
        return reply_error(AppError::MailerUnavailable("SMTP not configured".to_string()));
    };
    if state.mail_to().is_empty() {
        tracing::warn!("Delivery requested but MAIL_TO is empty");
        return reply_error(AppError::MailerUnavailable("MAIL_TO is empty".to_string()));
    }

    let content = build_email(&submission);
    match mailer.send(state.mail_to(), &content).await {
        Ok(()) => {
            tracing::info!("Submission delivered");
            reply(StatusCode::OK, DeliveryResponse::accepted())
        }
        Err(e) => {
            tracing::error!(
                receipt_number = %submission.receipt_number(),
                error = %e,
                "Delivery failed after local persistence"
            );
            reply_error(AppError::DeliveryFailed(e.to_string()))
        }
    }
}
