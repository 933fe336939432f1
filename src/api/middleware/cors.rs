//! CORS policy for the public API.

use axum::http::Method;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Creates the CORS layer: any origin, any header, the standard methods.
///
/// `max_age` tells browsers how long to cache preflight results.
pub fn layer(max_age: Duration) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(max_age)
}
