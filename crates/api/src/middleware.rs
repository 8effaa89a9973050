use axum::{
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use shopadvisor_core::RequestId;

use crate::context::RequestContext;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Attach a [`RequestContext`] to every request and echo its id back.
///
/// A well-formed incoming `x-request-id` is reused so callers can correlate logs.
pub async fn request_context(mut req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let request_id = extract_request_id(req.headers()).unwrap_or_default();
    req.extensions_mut().insert(RequestContext::new(request_id));

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn extract_request_id(headers: &HeaderMap) -> Option<RequestId> {
    headers
        .get(REQUEST_ID_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
