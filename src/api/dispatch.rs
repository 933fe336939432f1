//! Request dispatch wrapper.
//!
//! Every API route is registered through [`ApiRouter::handle`], which turns a
//! synchronous `(state, request) -> response` handler into an Axum route and
//! applies the same behavior to all of them:
//!
//! 1. Log the request entry.
//! 2. Run the handler exactly once inside a panic boundary.
//! 3. Serialize the [`HttpResponse`] with [`response::write`].
//! 4. Log failure responses (`WARN` for 4xx, `ERROR` for 5xx).
//!
//! Panics and response contract violations become a generic `500`; their
//! details only reach the server log.

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, FromRequestParts, Multipart, RawPathParams, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{self, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodFilter, on};
use std::any::Any;
use std::backtrace::Backtrace;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, warn};
use url::form_urlencoded;

use crate::api::response::{self, HttpResponse, IntoHttpResponse, ResponseError};
use crate::state::AppState;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// Reading the inbound request failed before the handler could run.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Request body could not be read (limit {limit} bytes)")]
    Body { limit: usize },

    #[error("Malformed multipart form: {0}")]
    Multipart(String),
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, RequestError> {
    axum::body::to_bytes(body, limit)
        .await
        .map_err(|_| RequestError::Body { limit })
}

/// Text fields of a `multipart/form-data` body, in order. File parts are skipped.
async fn multipart_values(
    content_type: &str,
    body: Bytes,
) -> Result<Vec<(String, String)>, RequestError> {
    let request = http::Request::builder()
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .map_err(|e| RequestError::Multipart(e.to_string()))?;

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| RequestError::Multipart(e.body_text()))?;

    let mut values = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RequestError::Multipart(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if field.file_name().is_some() {
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| RequestError::Multipart(e.body_text()))?;
        values.push((name, value));
    }

    Ok(values)
}

/// The view of an inbound request that handlers receive.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    path_params: HashMap<String, String>,
    form: Vec<(String, String)>,
}

impl HandlerRequest {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            path_params: HashMap::new(),
            form: Vec::new(),
        }
    }

    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    pub fn with_form_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((name.into(), value.into()));
        self
    }

    /// Reads path parameters, then form values from an urlencoded or
    /// multipart body (at most `form_limit` bytes) followed by the query string.
    pub async fn from_request(request: Request, form_limit: usize) -> Result<Self, RequestError> {
        let (mut parts, body) = request.into_parts();

        let path_params = RawPathParams::from_request_parts(&mut parts, &())
            .await
            .map(|params| {
                params
                    .iter()
                    .map(|(name, value)| (name.to_owned(), value.to_owned()))
                    .collect()
            })
            .unwrap_or_default();

        let mut form = Vec::new();

        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if content_type.starts_with(FORM_CONTENT_TYPE) {
            let bytes = read_body(body, form_limit).await?;
            form.extend(form_urlencoded::parse(&bytes).into_owned());
        } else if content_type.starts_with(MULTIPART_CONTENT_TYPE) {
            let bytes = read_body(body, form_limit).await?;
            form.extend(multipart_values(content_type, bytes).await?);
        }

        if let Some(query) = parts.uri.query() {
            form.extend(form_urlencoded::parse(query.as_bytes()).into_owned());
        }

        Ok(Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            path_params,
            form,
        })
    }

    /// Value of a named path segment, e.g. `code` in `/{code}`.
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    /// First form value for `name`; body values take precedence over the query string.
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Builds a router whose routes all go through the dispatch wrapper.
pub struct ApiRouter {
    router: Router<AppState>,
    form_limit: usize,
}

impl ApiRouter {
    /// `form_limit` caps the size of urlencoded request bodies.
    pub fn new(form_limit: usize) -> Self {
        Self {
            router: Router::new(),
            form_limit,
        }
    }

    /// Registers `handler` for `method` requests to `path`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let router = ApiRouter::new(16 * 1024)
    ///     .handle(MethodFilter::POST, "/shorten", shorten_handler)
    ///     .into_router();
    /// ```
    pub fn handle<H, R>(mut self, method: MethodFilter, path: &str, handler: H) -> Self
    where
        H: Fn(&AppState, &HandlerRequest) -> R + Clone + Send + Sync + 'static,
        R: IntoHttpResponse,
    {
        debug!(?method, path, "Registering handler");

        let form_limit = self.form_limit;
        let route = on(
            method,
            move |State(state): State<AppState>, request: Request| async move {
                dispatch(&state, request, form_limit, &handler).await
            },
        );

        self.router = self.router.route(path, route);
        self
    }

    pub fn into_router(self) -> Router<AppState> {
        self.router
    }
}

async fn dispatch<H, R>(
    state: &AppState,
    request: Request,
    form_limit: usize,
    handler: &H,
) -> Response
where
    H: Fn(&AppState, &HandlerRequest) -> R,
    R: IntoHttpResponse,
{
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let request_headers = request.headers().clone();

    debug!(%method, %path, "Dispatching request");

    let outcome = match HandlerRequest::from_request(request, form_limit).await {
        Ok(request) => run_handler(state, &request, handler),
        Err(err) => HttpResponse::bad_request().from_trusted_error(&err),
    };

    let handler_response = match outcome {
        Ok(handler_response) => handler_response,
        Err(violation) => {
            error!(%method, %path, error = %violation, "Handler broke the response contract, aborting request");
            HttpResponse::generic_server_error()
        }
    };

    let failure = Failure::of(&handler_response);

    let response = match response::write(&request_headers, handler_response) {
        Ok(response) => response,
        Err(err) => {
            error!(%method, %path, error = %err, "Failed to write response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    };

    if let Some(failure) = failure {
        failure.log(&method, &path);
    }

    response
}

fn run_handler<H, R>(
    state: &AppState,
    request: &HandlerRequest,
    handler: &H,
) -> Result<HttpResponse, ResponseError>
where
    H: Fn(&AppState, &HandlerRequest) -> R,
    R: IntoHttpResponse,
{
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        handler(state, request).into_http_response()
    }));

    result.unwrap_or_else(|panic| {
        error!(
            method = %request.method,
            path = %request.uri.path(),
            panic = panic_message(panic.as_ref()),
            "Handler panicked"
        );
        Ok(HttpResponse::generic_server_error())
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// What gets logged about a failed response once it has been written.
struct Failure {
    status: StatusCode,
    message: Option<String>,
}

impl Failure {
    fn of(response: &HttpResponse) -> Option<Self> {
        (!response.is_successful()).then(|| Self {
            status: response.status_code(),
            message: response.payload().as_text().map(str::to_owned),
        })
    }

    fn log(self, method: &Method, path: &str) {
        let status = self.status.as_u16();

        match self.message {
            None => error!(%method, path, status, "Error response did not hold the expected payload"),
            Some(message) if self.status.is_server_error() => {
                error!(%method, path, status, "{message}")
            }
            Some(message) => warn!(%method, path, status, "{message}"),
        }
    }
}

/// Logs every panic with its location and a full backtrace.
///
/// Installed once at startup; the dispatcher's own log line then adds the
/// request it happened in.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::force_capture();
        error!(panic = %info, %backtrace, "Panic");
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_request(uri: &str, body: &'static str) -> Request {
        http::Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_form_value_from_body() {
        let request = HandlerRequest::from_request(
            form_request("/shorten", "url=https%3A%2F%2Fexample.com%2Fpage"),
            1024,
        )
        .await
        .unwrap();

        assert_eq!(request.form_value("url"), Some("https://example.com/page"));
        assert_eq!(request.form_value("missing"), None);
    }

    #[tokio::test]
    async fn test_body_takes_precedence_over_query() {
        let request = HandlerRequest::from_request(
            form_request("/shorten?url=https://query.example", "url=https://body.example"),
            1024,
        )
        .await
        .unwrap();

        assert_eq!(request.form_value("url"), Some("https://body.example"));
    }

    #[tokio::test]
    async fn test_query_string_is_read_without_form_body() {
        let request = http::Request::builder()
            .uri("/shorten?url=https://query.example")
            .body(Body::empty())
            .unwrap();

        let request = HandlerRequest::from_request(request, 1024).await.unwrap();

        assert_eq!(request.form_value("url"), Some("https://query.example"));
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let result =
            HandlerRequest::from_request(form_request("/shorten", "url=https://example.com"), 4)
                .await;

        assert!(matches!(result, Err(RequestError::Body { limit: 4 })));
    }

    #[test]
    fn test_builder_helpers() {
        let request = HandlerRequest::new(Method::GET, Uri::from_static("/abc"))
            .with_path_param("code", "abc")
            .with_form_value("url", "https://example.com");

        assert_eq!(request.path_param("code"), Some("abc"));
        assert_eq!(request.path_param("other"), None);
        assert_eq!(request.form_value("url"), Some("https://example.com"));
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(payload.as_ref()), "owned boom");

        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
    }

    #[test]
    fn test_failure_note_only_for_unsuccessful_responses() {
        assert!(Failure::of(&HttpResponse::no_content()).is_none());

        let failure = Failure::of(
            &HttpResponse::not_found()
                .from_trusted_message("Short URL not found - x")
                .unwrap(),
        )
        .unwrap();
        assert_eq!(failure.status, StatusCode::NOT_FOUND);
        assert_eq!(failure.message.as_deref(), Some("Short URL not found - x"));

        let failure = Failure::of(
            &HttpResponse::conflict()
                .with_json(&serde_json::json!({"code": "x"}))
                .unwrap(),
        )
        .unwrap();
        assert!(failure.message.is_none());
    }

    fn multipart_request(uri: &str, body: &'static str) -> Request {
        http::Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_form_value_from_multipart_body() {
        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"url\"\r\n\
            \r\n\
            https://example.com/page\r\n\
            --XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"upload\"; filename=\"a.txt\"\r\n\
            Content-Type: text/plain\r\n\
            \r\n\
            ignored\r\n\
            --XBOUNDARY--\r\n";

        let request = HandlerRequest::from_request(
            multipart_request("/shorten?url=https://query.example", body),
            1024,
        )
        .await
        .unwrap();

        assert_eq!(request.form_value("url"), Some("https://example.com/page"));
        assert_eq!(request.form_value("upload"), None);
    }

    #[tokio::test]
    async fn test_oversized_multipart_body_is_rejected() {
        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"url\"\r\n\
            \r\n\
            https://example.com/page\r\n\
            --XBOUNDARY--\r\n";

        let result = HandlerRequest::from_request(multipart_request("/shorten", body), 16).await;

        assert!(matches!(result, Err(RequestError::Body { limit: 16 })));
    }

    #[tokio::test]
    async fn test_malformed_multipart_body_is_rejected() {
        let result =
            HandlerRequest::from_request(multipart_request("/shorten", "not multipart"), 1024)
                .await;

        assert!(matches!(result, Err(RequestError::Multipart(_))));
    }
}
