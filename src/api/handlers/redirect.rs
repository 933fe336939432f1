//! Handler for short URL redirect.

use crate::api::dispatch::HandlerRequest;
use crate::api::response::{HttpResponse, IntoHttpResponse, ResponseError};
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /api/v1/{code}`
///
/// # Errors
///
/// Returns 400 Bad Request if the route carried no `code` segment and
/// 404 Not Found if the code was never issued.
pub fn redirect_handler(
    state: &AppState,
    request: &HandlerRequest,
) -> Result<HttpResponse, ResponseError> {
    let Some(code) = request.path_param("code") else {
        return AppError::MissingCode.into_http_response();
    };

    match state.link_service.resolve(code) {
        Ok(target) => Ok(HttpResponse::redirect().temporary(target)),
        Err(err) => err.into_http_response(),
    }
}
