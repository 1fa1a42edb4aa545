pub mod todos;

use axum::{Router, routing::get};

use crate::http::types::ApiError;

pub fn app(router: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(router)
        .fallback(unmatched_route)
}

async fn unmatched_route() -> ApiError {
    ApiError::route_not_found()
}
