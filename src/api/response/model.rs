//! The response value produced by handlers.

use axum::http::{HeaderMap, StatusCode};
use serde_json::Value;

pub const CONTENT_APP_JSON: &str = "application/json;charset=utf-8";
pub const CONTENT_TEXT_PLAIN: &str = "text/plain;charset=utf-8";
pub const CONTENT_TEXT_HTML: &str = "text/html;charset=utf-8";

/// Shape of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Empty,
    Text,
    Json,
    Redirect,
}

/// Response body, tagged with how it is encoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Text(String),
    Json(Value),
    /// Redirect target URL.
    Redirect(String),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Empty => PayloadKind::Empty,
            Self::Text(_) => PayloadKind::Text,
            Self::Json(_) => PayloadKind::Json,
            Self::Redirect(_) => PayloadKind::Redirect,
        }
    }

    /// The text of a `Text` payload.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// An HTTP response described as data.
///
/// Built through the constructors in [`super::builder`] and turned into a
/// transport response exactly once by [`super::write`].
///
/// # Invariants
///
/// - A `Redirect` payload is always successful and carries a 3xx status.
/// - A failed response always carries a non-empty trusted message or a JSON value.
/// - `etag` is only ever set on successful text or JSON responses.
#[derive(Debug)]
pub struct HttpResponse {
    pub(super) status: StatusCode,
    pub(super) succeeded: bool,
    pub(super) content_type: String,
    pub(super) payload: Payload,
    pub(super) headers: HeaderMap,
    pub(super) etag: bool,
}

impl HttpResponse {
    pub(super) fn success(status: StatusCode) -> Self {
        Self {
            status,
            succeeded: true,
            content_type: CONTENT_TEXT_PLAIN.to_string(),
            payload: Payload::Empty,
            headers: HeaderMap::new(),
            etag: false,
        }
    }

    pub(super) fn failure(status: StatusCode) -> Self {
        Self {
            succeeded: false,
            ..Self::success(status)
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn is_successful(&self) -> bool {
        self.succeeded
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn uses_etag(&self) -> bool {
        self.etag
    }

    /// Attaches additional response headers.
    ///
    /// Calling this again replaces the previously attached set. Headers the
    /// writer controls (`Content-Type`, `ETag`, `Cache-Control`, `Location`,
    /// `X-Content-Type-Options`) win over caller-supplied values.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}
