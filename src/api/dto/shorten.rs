//! DTOs for the link shortening endpoint.

use serde::Serialize;

/// Body returned after a successful shorten request.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    #[serde(rename = "shortUrl")]
    pub short_url: String,
}
