//! Serialization of [`HttpResponse`] values to the transport.

use axum::body::Body;
use axum::http::header::{
    CACHE_CONTROL, CONTENT_TYPE, ETAG, HeaderName, LOCATION, X_CONTENT_TYPE_OPTIONS,
};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;

use super::error::WriteError;
use super::etag::{ETAG_CACHE_CONTROL, canonical_json, is_fresh, weak_etag};
use super::model::{HttpResponse, Payload};

/// Writes `response` as a transport response.
///
/// Custom headers are applied first, then the headers this writer controls,
/// so the latter win on conflict.
///
/// - Failures get `X-Content-Type-Options: nosniff` and a text or JSON body.
/// - Redirects set `Location` (non-ASCII bytes percent-encoded), carry a
///   short HTML link body and skip entity tags entirely.
/// - Tagged successes get `ETag` and `Cache-Control`; if `request_headers`
///   show the client copy is fresh, the result is `304` with an empty body.
///
/// # Errors
///
/// Returns [`WriteError`] if the payload cannot be encoded, a header value is
/// invalid, or the payload kind is not allowed for this response.
pub fn write(request_headers: &HeaderMap, response: HttpResponse) -> Result<Response, WriteError> {
    let HttpResponse {
        status,
        succeeded,
        content_type,
        payload,
        mut headers,
        etag,
    } = response;

    set_header(&mut headers, CONTENT_TYPE, &content_type)?;

    if !succeeded {
        return write_error(status, headers, payload);
    }

    if let Payload::Redirect(location) = &payload {
        let location = escape_non_ascii(location);
        set_header(&mut headers, LOCATION, &location)?;
        return Ok(build(status, headers, redirect_body(status, &location)));
    }

    if etag {
        return write_etag_payload(request_headers, status, headers, payload);
    }

    let body = match payload {
        Payload::Text(text) => text.into_bytes(),
        Payload::Json(value) => serde_json::to_vec(&value)?,
        Payload::Empty => Vec::new(),
        other => return Err(WriteError::UnsupportedPayload(other.kind())),
    };

    Ok(build(status, headers, body))
}

fn write_etag_payload(
    request_headers: &HeaderMap,
    status: StatusCode,
    mut headers: HeaderMap,
    payload: Payload,
) -> Result<Response, WriteError> {
    let body = match payload {
        Payload::Text(text) => text.into_bytes(),
        Payload::Json(value) => canonical_json(&value)?,
        Payload::Empty => return Ok(build(status, headers, Vec::new())),
        other => return Err(WriteError::UnsupportedPayload(other.kind())),
    };

    set_header(&mut headers, ETAG, &weak_etag(&body))?;
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(ETAG_CACHE_CONTROL));

    if is_fresh(request_headers, &headers) {
        return Ok(build(StatusCode::NOT_MODIFIED, headers, Vec::new()));
    }

    Ok(build(status, headers, body))
}

fn write_error(
    status: StatusCode,
    mut headers: HeaderMap,
    payload: Payload,
) -> Result<Response, WriteError> {
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));

    let body = match payload {
        Payload::Json(value) => serde_json::to_vec(&value)?,
        Payload::Text(message) => message.into_bytes(),
        other => return Err(WriteError::UnsupportedPayload(other.kind())),
    };

    Ok(build(status, headers, body))
}

/// Percent-encodes every byte outside the ASCII range.
fn escape_non_ascii(location: &str) -> String {
    let mut escaped = String::with_capacity(location.len());
    for byte in location.bytes() {
        if byte.is_ascii() {
            escaped.push(char::from(byte));
        } else {
            escaped.push_str(&format!("%{byte:02X}"));
        }
    }
    escaped
}

fn redirect_body(status: StatusCode, location: &str) -> Vec<u8> {
    let reason = status.canonical_reason().unwrap_or("Redirect");
    format!("<a href=\"{}\">{}</a>.\n", escape_html(location), reason).into_bytes()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn set_header(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<(), WriteError> {
    let value = HeaderValue::from_str(value).map_err(|_| WriteError::InvalidHeader {
        name: name.as_str().to_owned(),
    })?;
    headers.insert(name, value);
    Ok(())
}

fn build(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
