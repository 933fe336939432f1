//! Errors raised while building or writing an [`HttpResponse`](super::HttpResponse).

use axum::http::StatusCode;

use super::PayloadKind;

/// A handler broke the response construction contract.
///
/// These are programmer defects, not client errors. The dispatcher aborts the
/// request with a generic `500` when it receives one.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("json payload cannot be null, use NoContent instead")]
    NilJsonPayload,

    #[error("message cannot be empty")]
    EmptyMessage,

    #[error("response with status {status} was finished without selecting a payload")]
    MissingPayload { status: StatusCode },

    #[error("payload could not be converted to JSON: {0}")]
    JsonConversion(#[from] serde_json::Error),
}

/// Serializing a finished response to the transport failed.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("unsupported payload type: {0:?}")]
    UnsupportedPayload(PayloadKind),

    #[error("failed to encode JSON payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid value for header {name}")]
    InvalidHeader { name: String },
}
