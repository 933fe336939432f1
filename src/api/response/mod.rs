//! Structured HTTP responses.
//!
//! Handlers describe their response as an [`HttpResponse`] value built through
//! a small grammar (status, then payload, then optional caching and headers).
//! The dispatcher serializes it with [`write`], which owns content type,
//! security headers, redirects and the conditional-caching (ETag) flow.

mod builder;
mod error;
mod etag;
mod model;
mod write;

pub use builder::{
    GENERIC_SERVER_ERROR, IntoHttpResponse, PartialFail, PartialOk, PartialRedirect,
    PartialSuccess,
};
pub use error::{ResponseError, WriteError};
pub use etag::{ETAG_CACHE_CONTROL, canonical_json, is_fresh, weak_etag};
pub use model::{
    CONTENT_APP_JSON, CONTENT_TEXT_HTML, CONTENT_TEXT_PLAIN, HttpResponse, Payload, PayloadKind,
};
pub use write::write;
