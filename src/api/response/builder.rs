//! Builder grammar for [`HttpResponse`].
//!
//! A response is built in steps that mirror HTTP semantics: pick a status
//! constructor, then (for success and failure statuses) pick exactly one
//! payload form. Partial values cannot be written; finishing one without a
//! payload is a [`ResponseError::MissingPayload`].
//!
//! ```ignore
//! HttpResponse::ok().with_json(&body)?;
//! HttpResponse::ok().etag().with_text("cached");
//! HttpResponse::not_found().from_trusted_message("Short URL not found - abc")?;
//! HttpResponse::redirect().temporary("https://example.com");
//! ```

use axum::http::{HeaderMap, StatusCode};
use serde::Serialize;
use serde_json::Value;

use super::error::ResponseError;
use super::model::{CONTENT_APP_JSON, CONTENT_TEXT_HTML, CONTENT_TEXT_PLAIN, HttpResponse, Payload};

/// Message sent to clients whenever a request fails for an internal reason.
pub const GENERIC_SERVER_ERROR: &str = "Internal Server Error";

fn json_payload<T: Serialize + ?Sized>(payload: &T) -> Result<Value, ResponseError> {
    match serde_json::to_value(payload)? {
        Value::Null => Err(ResponseError::NilJsonPayload),
        value => Ok(value),
    }
}

/// A `200 OK` awaiting its payload. Also allows header-only responses.
#[derive(Debug)]
pub struct PartialOk(PartialSuccess);

impl PartialOk {
    /// Header-only response, e.g. for `HEAD` requests. An empty
    /// `content_type` keeps the default.
    pub fn info(self, content_type: &str, headers: HeaderMap) -> HttpResponse {
        let mut response = self.0.response;

        if !content_type.is_empty() {
            response.content_type = content_type.to_string();
        }

        response.headers = headers;
        response
    }

    pub fn etag(self) -> PartialSuccess {
        self.0.etag()
    }

    pub fn with_json<T: Serialize + ?Sized>(self, payload: &T) -> Result<HttpResponse, ResponseError> {
        self.0.with_json(payload)
    }

    pub fn with_text(self, text: impl Into<String>) -> HttpResponse {
        self.0.with_text(text)
    }
}

/// A 2xx response awaiting its payload.
#[derive(Debug)]
pub struct PartialSuccess {
    response: HttpResponse,
}

impl PartialSuccess {
    /// Sets a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::NilJsonPayload`] if the value serializes to
    /// `null`; use [`HttpResponse::no_content`] for empty bodies.
    pub fn with_json<T: Serialize + ?Sized>(
        mut self,
        payload: &T,
    ) -> Result<HttpResponse, ResponseError> {
        self.response.payload = Payload::Json(json_payload(payload)?);
        self.response.content_type = CONTENT_APP_JSON.to_string();
        Ok(self.response)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> HttpResponse {
        self.response.payload = Payload::Text(text.into());
        self.response.content_type = CONTENT_TEXT_PLAIN.to_string();
        self.response
    }

    /// Enables conditional caching with a weak entity tag.
    pub fn etag(mut self) -> Self {
        self.response.etag = true;
        self
    }
}

/// A 4xx/5xx response awaiting its client-safe payload.
#[derive(Debug)]
pub struct PartialFail {
    response: HttpResponse,
}

impl PartialFail {
    /// Uses the error's display text as the client message.
    ///
    /// The text is shown to API clients as-is, so it must not contain
    /// internal details.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::EmptyMessage`] if the error displays as an empty string.
    pub fn from_trusted_error<E: std::error::Error + ?Sized>(
        self,
        err: &E,
    ) -> Result<HttpResponse, ResponseError> {
        self.from_trusted_message(err.to_string())
    }

    /// Uses `message` as the client message.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::EmptyMessage`] if `message` is empty.
    pub fn from_trusted_message(
        mut self,
        message: impl Into<String>,
    ) -> Result<HttpResponse, ResponseError> {
        let message = message.into();
        if message.is_empty() {
            return Err(ResponseError::EmptyMessage);
        }

        self.response.payload = Payload::Text(message);
        Ok(self.response)
    }

    /// Sets a structured, client-safe JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::NilJsonPayload`] if the value serializes to `null`.
    pub fn with_json<T: Serialize + ?Sized>(
        mut self,
        payload: &T,
    ) -> Result<HttpResponse, ResponseError> {
        self.response.payload = Payload::Json(json_payload(payload)?);
        self.response.content_type = CONTENT_APP_JSON.to_string();
        Ok(self.response)
    }
}

/// A redirect awaiting its target and flavour.
#[derive(Debug)]
pub struct PartialRedirect;

impl PartialRedirect {
    fn to(status: StatusCode, url: impl Into<String>) -> HttpResponse {
        let mut response = HttpResponse::success(status);
        response.payload = Payload::Redirect(url.into());
        response.content_type = CONTENT_TEXT_HTML.to_string();
        response
    }

    /// `301 Moved Permanently`
    pub fn moved_permanently(self, url: impl Into<String>) -> HttpResponse {
        Self::to(StatusCode::MOVED_PERMANENTLY, url)
    }

    /// `302 Found`
    pub fn found(self, url: impl Into<String>) -> HttpResponse {
        Self::to(StatusCode::FOUND, url)
    }

    /// `307 Temporary Redirect`
    pub fn temporary(self, url: impl Into<String>) -> HttpResponse {
        Self::to(StatusCode::TEMPORARY_REDIRECT, url)
    }

    /// `308 Permanent Redirect`
    pub fn permanent(self, url: impl Into<String>) -> HttpResponse {
        Self::to(StatusCode::PERMANENT_REDIRECT, url)
    }
}

fn partial_fail(status: StatusCode) -> PartialFail {
    PartialFail {
        response: HttpResponse::failure(status),
    }
}

fn partial_success(status: StatusCode) -> PartialSuccess {
    PartialSuccess {
        response: HttpResponse::success(status),
    }
}

impl HttpResponse {
    // 2xx

    /// `200 OK`. Choose the payload next; use [`Self::no_content`] for empty bodies.
    pub fn ok() -> PartialOk {
        PartialOk(partial_success(StatusCode::OK))
    }

    pub fn created() -> PartialSuccess {
        partial_success(StatusCode::CREATED)
    }

    pub fn accepted() -> PartialSuccess {
        partial_success(StatusCode::ACCEPTED)
    }

    pub fn no_content() -> HttpResponse {
        HttpResponse::success(StatusCode::NO_CONTENT)
    }

    // 3xx

    pub fn not_modified() -> HttpResponse {
        HttpResponse::success(StatusCode::NOT_MODIFIED)
    }

    pub fn redirect() -> PartialRedirect {
        PartialRedirect
    }

    // 4xx

    pub fn bad_request() -> PartialFail {
        partial_fail(StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized() -> PartialFail {
        partial_fail(StatusCode::UNAUTHORIZED)
    }

    pub fn payment_required() -> PartialFail {
        partial_fail(StatusCode::PAYMENT_REQUIRED)
    }

    pub fn forbidden() -> PartialFail {
        partial_fail(StatusCode::FORBIDDEN)
    }

    pub fn not_found() -> PartialFail {
        partial_fail(StatusCode::NOT_FOUND)
    }

    pub fn method_not_allowed() -> PartialFail {
        partial_fail(StatusCode::METHOD_NOT_ALLOWED)
    }

    pub fn not_acceptable() -> PartialFail {
        partial_fail(StatusCode::NOT_ACCEPTABLE)
    }

    pub fn conflict() -> PartialFail {
        partial_fail(StatusCode::CONFLICT)
    }

    pub fn gone() -> PartialFail {
        partial_fail(StatusCode::GONE)
    }

    pub fn precondition_failed() -> PartialFail {
        partial_fail(StatusCode::PRECONDITION_FAILED)
    }

    pub fn payload_too_large() -> PartialFail {
        partial_fail(StatusCode::PAYLOAD_TOO_LARGE)
    }

    pub fn locked() -> PartialFail {
        partial_fail(StatusCode::LOCKED)
    }

    // 5xx

    pub fn internal_server_error() -> PartialFail {
        partial_fail(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn not_implemented() -> PartialFail {
        partial_fail(StatusCode::NOT_IMPLEMENTED)
    }

    pub fn service_unavailable() -> PartialFail {
        partial_fail(StatusCode::SERVICE_UNAVAILABLE)
    }

    /// Failure with an arbitrary status, for proxying upstream errors.
    ///
    /// Statuses outside `400..=599` become `500`.
    pub fn custom_error(status: u16) -> PartialFail {
        let status = match status {
            400..=599 => StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        partial_fail(status)
    }

    /// `500` with the generic client message. Used when a request is aborted.
    pub fn generic_server_error() -> HttpResponse {
        let mut response = HttpResponse::failure(StatusCode::INTERNAL_SERVER_ERROR);
        response.payload = Payload::Text(GENERIC_SERVER_ERROR.to_string());
        response
    }
}

/// Values a handler may return.
///
/// Finished responses convert as-is. Partial builders convert to
/// [`ResponseError::MissingPayload`], so a handler that stops after picking a
/// status is caught as a contract violation rather than written.
pub trait IntoHttpResponse {
    fn into_http_response(self) -> Result<HttpResponse, ResponseError>;
}

impl IntoHttpResponse for HttpResponse {
    fn into_http_response(self) -> Result<HttpResponse, ResponseError> {
        Ok(self)
    }
}

impl<R: IntoHttpResponse> IntoHttpResponse for Result<R, ResponseError> {
    fn into_http_response(self) -> Result<HttpResponse, ResponseError> {
        self.and_then(IntoHttpResponse::into_http_response)
    }
}

impl IntoHttpResponse for PartialOk {
    fn into_http_response(self) -> Result<HttpResponse, ResponseError> {
        self.0.into_http_response()
    }
}

impl IntoHttpResponse for PartialSuccess {
    fn into_http_response(self) -> Result<HttpResponse, ResponseError> {
        Err(ResponseError::MissingPayload {
            status: self.response.status,
        })
    }
}

impl IntoHttpResponse for PartialFail {
    fn into_http_response(self) -> Result<HttpResponse, ResponseError> {
        Err(ResponseError::MissingPayload {
            status: self.response.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::response::PayloadKind;
    use axum::http::HeaderValue;
    use serde_json::json;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct TrustedError(&'static str);

    #[test]
    fn test_ok_with_json() {
        let response = HttpResponse::ok().with_json(&json!({"a": 1})).unwrap();

        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.is_successful());
        assert_eq!(response.payload().kind(), PayloadKind::Json);
        assert_eq!(response.content_type(), CONTENT_APP_JSON);
        assert!(!response.uses_etag());
    }

    #[test]
    fn test_with_json_rejects_null() {
        let result = HttpResponse::ok().with_json(&Option::<String>::None);
        assert!(matches!(result, Err(ResponseError::NilJsonPayload)));

        let result = HttpResponse::bad_request().with_json(&Value::Null);
        assert!(matches!(result, Err(ResponseError::NilJsonPayload)));
    }

    #[test]
    fn test_created_with_text() {
        let response = HttpResponse::created().with_text("made");

        assert_eq!(response.status_code(), StatusCode::CREATED);
        assert_eq!(response.payload(), &Payload::Text("made".to_string()));
        assert_eq!(response.content_type(), CONTENT_TEXT_PLAIN);
    }

    #[test]
    fn test_etag_flag() {
        let response = HttpResponse::ok().etag().with_text("cached");
        assert!(response.uses_etag());

        let response = HttpResponse::accepted().etag().with_json(&json!([1])).unwrap();
        assert!(response.uses_etag());
    }

    #[test]
    fn test_info_keeps_headers_and_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert("x-total", HeaderValue::from_static("3"));

        let response = HttpResponse::ok().info("application/pdf", headers);
        assert_eq!(response.content_type(), "application/pdf");
        assert_eq!(response.headers()["x-total"], "3");
        assert_eq!(response.payload(), &Payload::Empty);

        let response = HttpResponse::ok().info("", HeaderMap::new());
        assert_eq!(response.content_type(), CONTENT_TEXT_PLAIN);
    }

    #[test]
    fn test_no_content_and_not_modified() {
        assert_eq!(
            HttpResponse::no_content().status_code(),
            StatusCode::NO_CONTENT
        );
        assert_eq!(
            HttpResponse::not_modified().status_code(),
            StatusCode::NOT_MODIFIED
        );
    }

    #[test]
    fn test_redirect_variants() {
        let cases = [
            (HttpResponse::redirect().found("https://a.example"), 302),
            (HttpResponse::redirect().temporary("https://a.example"), 307),
            (HttpResponse::redirect().permanent("https://a.example"), 308),
            (HttpResponse::redirect().moved_permanently("https://a.example"), 301),
        ];

        for (response, status) in cases {
            assert_eq!(response.status_code().as_u16(), status);
            assert!(response.is_successful());
            assert_eq!(
                response.payload(),
                &Payload::Redirect("https://a.example".to_string())
            );
            assert_eq!(response.content_type(), CONTENT_TEXT_HTML);
        }
    }

    #[test]
    fn test_trusted_message() {
        let response = HttpResponse::not_found()
            .from_trusted_message("Short URL not found - abc")
            .unwrap();

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert!(!response.is_successful());
        assert_eq!(response.payload().as_text(), Some("Short URL not found - abc"));
    }

    #[test]
    fn test_empty_trusted_message_is_rejected() {
        let result = HttpResponse::bad_request().from_trusted_message("");
        assert!(matches!(result, Err(ResponseError::EmptyMessage)));
    }

    #[test]
    fn test_trusted_error() {
        let response = HttpResponse::conflict()
            .from_trusted_error(&TrustedError("already exists"))
            .unwrap();
        assert_eq!(response.payload().as_text(), Some("already exists"));

        let result = HttpResponse::conflict().from_trusted_error(&TrustedError(""));
        assert!(matches!(result, Err(ResponseError::EmptyMessage)));
    }

    #[test]
    fn test_custom_error_clamps_status() {
        let in_range = HttpResponse::custom_error(418)
            .from_trusted_message("teapot")
            .unwrap();
        assert_eq!(in_range.status_code().as_u16(), 418);

        for status in [200, 302, 399, 600, 999] {
            let response = HttpResponse::custom_error(status)
                .from_trusted_message("clamped")
                .unwrap();
            assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_with_headers_replaces_previous_set() {
        let mut first = HeaderMap::new();
        first.insert("x-first", HeaderValue::from_static("1"));
        let mut second = HeaderMap::new();
        second.insert("x-second", HeaderValue::from_static("2"));

        let response = HttpResponse::ok()
            .with_text("body")
            .with_headers(first)
            .with_headers(second);

        assert!(response.headers().get("x-first").is_none());
        assert_eq!(response.headers()["x-second"], "2");
    }

    #[test]
    fn test_partial_fail_without_payload_is_a_violation() {
        let result = HttpResponse::bad_request().into_http_response();

        assert!(matches!(
            result,
            Err(ResponseError::MissingPayload {
                status: StatusCode::BAD_REQUEST
            })
        ));
    }

    #[test]
    fn test_partial_success_without_payload_is_a_violation() {
        assert!(HttpResponse::ok().into_http_response().is_err());
        assert!(HttpResponse::created().etag().into_http_response().is_err());
    }

    #[test]
    fn test_result_conversion_passes_through() {
        let ok: Result<HttpResponse, ResponseError> = Ok(HttpResponse::no_content());
        assert!(ok.into_http_response().is_ok());

        let err: Result<HttpResponse, ResponseError> = Err(ResponseError::EmptyMessage);
        assert!(matches!(
            err.into_http_response(),
            Err(ResponseError::EmptyMessage)
        ));
    }

    #[test]
    fn test_generic_server_error() {
        let response = HttpResponse::generic_server_error();

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response.is_successful());
        assert_eq!(response.payload().as_text(), Some(GENERIC_SERVER_ERROR));
    }
}
