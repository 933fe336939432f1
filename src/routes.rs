//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /api/v1/shorten` - Create a short link
//! - `GET  /api/v1/{code}`  - Short link redirect
//! - `GET  /health`         - Liveness check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin, standard methods, cached preflight
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the application router with all routes and middleware, without
/// path normalization.
pub fn router(state: AppState, config: &Config) -> Router {
    Router::new()
        .merge(api::routes::system_routes(config.max_form_bytes))
        .nest(
            api::PATH_API_V1,
            api::routes::v1_routes(config.max_form_bytes),
        )
        .with_state(state)
        .layer(cors::layer(Duration::from_secs(config.cors_max_age_seconds)))
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] with trailing slashes trimmed.
pub fn app_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, config))
}
