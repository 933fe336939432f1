//! Validation for URLs submitted for shortening.

use url::Url;

/// Reasons a submitted URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("{0}")]
    Malformed(String),

    #[error("URL is missing scheme or host")]
    NotAbsolute,
}

const CONTROL_CHARACTER: &str = "invalid control character in URL";

/// Checks that `input` is an absolute URL with a non-empty scheme and host.
///
/// Control characters are rejected outright. The URL parser would strip tabs
/// and newlines, but the stored input keeps them and could never be sent back
/// in a `Location` header.
///
/// The input is not normalized; callers store exactly what was submitted so
/// that the redirect target matches it byte for byte.
///
/// # Errors
///
/// Returns [`UrlValidationError::Malformed`] if the URL contains a control
/// character or does not parse, and
/// [`UrlValidationError::NotAbsolute`] if it parses without a host
/// (e.g. `mailto:` or `data:` URLs).
///
/// # Examples
///
/// ```ignore
/// assert!(validate_absolute_url("https://example.com/page").is_ok());
/// assert!(validate_absolute_url("not-a-url").is_err());
/// assert!(validate_absolute_url("mailto:someone@example.com").is_err());
/// ```
pub fn validate_absolute_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::Malformed(CONTROL_CHARACTER.to_string()));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::Malformed(e.to_string()))?;

    if url.scheme().is_empty() || url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::NotAbsolute);
    }

    Ok(url)
}
