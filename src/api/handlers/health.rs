//! Handler for health check endpoint.

use crate::api::dispatch::HandlerRequest;
use crate::api::dto::health::HealthResponse;
use crate::api::response::{HttpResponse, IntoHttpResponse, ResponseError};
use crate::state::AppState;

/// Returns service liveness and the number of stored links.
///
/// # Endpoint
///
/// `GET /health`
///
/// The response is ETag-cached: clients sending the last `ETag` back in
/// `If-None-Match` get `304 Not Modified` until a new link is created.
///
/// # Response
///
/// ```json
/// { "links": 3, "status": "healthy", "version": "0.1.0" }
/// ```
pub fn health_handler(
    state: &AppState,
    _request: &HandlerRequest,
) -> Result<HttpResponse, ResponseError> {
    let links = match state.link_service.link_count() {
        Ok(links) => links,
        Err(err) => return err.into_http_response(),
    };

    HttpResponse::ok().etag().with_json(&HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        links,
    })
}
