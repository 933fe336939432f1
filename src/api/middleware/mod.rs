//! HTTP middleware applied around the API routes.

pub mod cors;
pub mod tracing;
