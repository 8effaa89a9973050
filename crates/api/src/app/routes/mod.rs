use axum::{routing::post, Router};

pub mod advise;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new().route("/advise", post(advise::advise))
}
