//! Client-facing errors for the shortening operations.

use axum::http::StatusCode;
use tracing::error;

use crate::api::response::{GENERIC_SERVER_ERROR, HttpResponse, IntoHttpResponse, ResponseError};
use crate::domain::repositories::StoreError;
use crate::utils::url_validator::UrlValidationError;

/// Errors returned by [`crate::application::services::LinkService`].
///
/// The `Display` text of every variant except [`AppError::Store`] is a trusted
/// message and is sent to the client verbatim. Store failures are logged and
/// replaced by a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing URL parameter")]
    MissingUrl,

    #[error("Invalid URL - {url} - {reason}")]
    InvalidUrl {
        url: String,
        reason: UrlValidationError,
    },

    #[error("Short URL not found in request")]
    MissingCode,

    #[error("Short URL not found - {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingUrl | Self::InvalidUrl { .. } | Self::MissingCode => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoHttpResponse for AppError {
    fn into_http_response(self) -> Result<HttpResponse, ResponseError> {
        match self {
            Self::Store(err) => {
                error!(error = %err, "Link store failure");
                HttpResponse::internal_server_error().from_trusted_message(GENERIC_SERVER_ERROR)
            }
            client_error => HttpResponse::custom_error(client_error.status_code().as_u16())
                .from_trusted_error(&client_error),
        }
    }
}
