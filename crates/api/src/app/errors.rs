use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use shopadvisor_core::DomainError;

/// Client mistakes rejected at the request boundary (always 4xx).
///
/// Failures after validation never reach this type; the advise handler
/// answers them with the degraded payload.
#[derive(Debug, Error)]
pub enum RequestProcessingError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

pub fn request_error_to_response(err: RequestProcessingError) -> axum::response::Response {
    match err {
        RequestProcessingError::Validation(DomainError::Validation(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        RequestProcessingError::InvalidBody(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_body", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
