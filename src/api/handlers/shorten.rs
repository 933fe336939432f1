//! Handler for the link shortening endpoint.

use crate::api::dispatch::HandlerRequest;
use crate::api::dto::shorten::ShortenResponse;
use crate::api::response::{HttpResponse, IntoHttpResponse, ResponseError};
use crate::state::AppState;

/// Creates a short link for the `url` form value.
///
/// # Endpoint
///
/// `POST /api/v1/shorten`
///
/// The value is read from an `application/x-www-form-urlencoded` body, falling
/// back to the query string.
///
/// # Response
///
/// ```json
/// { "shortUrl": "http://127.0.0.1:18080/api/v1/3q2-7wAAAAA" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `url` is missing or not an absolute URL.
pub fn shorten_handler(
    state: &AppState,
    request: &HandlerRequest,
) -> Result<HttpResponse, ResponseError> {
    let long_url = request.form_value("url").unwrap_or_default();

    match state.link_service.shorten(long_url) {
        Ok(link) => HttpResponse::ok().with_json(&ShortenResponse {
            short_url: link.short_url,
        }),
        Err(err) => err.into_http_response(),
    }
}
