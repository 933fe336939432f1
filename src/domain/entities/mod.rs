//! Core domain entities.
//!
//! - [`ShortLinkEntry`] - A short code mapped to its target URL

pub mod link;

pub use link::ShortLinkEntry;
