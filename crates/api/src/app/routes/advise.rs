use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::IntoResponse,
    Json,
};
use tracing::{info_span, warn, Instrument};

use shopadvisor_core::{Language, ShoppingQuery};

use crate::app::dto::{AdviseRequest, AdviseResponse, EchoedRequest};
use crate::app::errors::{self, RequestProcessingError};
use crate::app::services::AppServices;
use crate::context::RequestContext;

/// `POST /api/advise`
///
/// Validation problems are 400s. Everything after validation runs in its own
/// task; if that task fails the caller still gets a 200 with
/// `success: false` and the static fallback content.
pub async fn advise(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<AdviseRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return errors::request_error_to_response(RequestProcessingError::InvalidBody(
                rejection.body_text(),
            ));
        }
    };

    let query = match ShoppingQuery::parse(&body.query) {
        Ok(q) => q,
        Err(e) => return errors::request_error_to_response(e.into()),
    };

    let echoed = EchoedRequest {
        query: query.text().to_string(),
        language: Language::from_code(body.language.as_deref()),
        user_id: body.user_id.filter(|u| !u.trim().is_empty()),
    };

    let span = info_span!(
        "advise",
        request_id = %ctx.request_id(),
        language = echoed.language.as_str(),
    );

    let pipeline = {
        let services = Arc::clone(&services);
        let language = echoed.language;
        async move { services.advise(&query, language).await }.instrument(span.clone())
    };

    match tokio::spawn(pipeline).await {
        Ok(advice) => {
            let response =
                AdviseResponse::success(advice, echoed, services.snapshot(), services.links(), &ctx);
            Json(response).into_response()
        }
        Err(join_err) => {
            warn!(parent: &span, error = %join_err, "advise failed; serving degraded response");
            let response = AdviseResponse::degraded(echoed, services.snapshot(), services.links(), &ctx);
            Json(response).into_response()
        }
    }
}
