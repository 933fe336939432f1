//! Short link entity representing a code to target URL mapping.

use chrono::{DateTime, Utc};

/// A short code and the absolute URL it redirects to.
///
/// Entries are immutable once stored. The `target` has already been validated
/// as an absolute URL (scheme and host present) by the time an entry exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLinkEntry {
    pub code: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLinkEntry {
    /// Creates a new entry stamped with the current time.
    pub fn new(code: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            target: target.into(),
            created_at: Utc::now(),
        }
    }
}
