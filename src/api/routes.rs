//! API route configuration.

use axum::Router;
use axum::routing::MethodFilter;

use crate::api::dispatch::ApiRouter;
use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::state::AppState;

/// Version 1 routes, nested under [`crate::api::PATH_API_V1`].
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short link from the `url` form value
/// - `GET  /{code}`  - Redirect to the stored target
pub fn v1_routes(form_limit: usize) -> Router<AppState> {
    ApiRouter::new(form_limit)
        .handle(MethodFilter::POST, "/shorten", shorten_handler)
        .handle(MethodFilter::GET, "/{code}", redirect_handler)
        .into_router()
}

/// Unversioned operational routes.
///
/// - `GET /health` - Liveness and link count (ETag-cached)
pub fn system_routes(form_limit: usize) -> Router<AppState> {
    ApiRouter::new(form_limit)
        .handle(MethodFilter::GET, "/health", health_handler)
        .into_router()
}
