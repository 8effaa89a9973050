use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};

use crate::app::dto::HealthResponse;
use crate::app::services::AppServices;

/// Liveness plus a non-blocking readiness snapshot; never triggers initialization.
pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(HealthResponse::new(services.snapshot(), services.mode().as_str()))
}
