//! HTTP API layer.
//!
//! - [`response`] - Response model, builder grammar and serialization
//! - [`dispatch`] - Dispatch wrapper applied to every handler
//! - [`handlers`] - Endpoint handlers
//! - [`dto`] - Response bodies
//! - [`middleware`] - Tracing and CORS layers
//! - [`routes`] - Route configuration

pub mod dispatch;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;

/// Prefix for version 1 of the API.
pub const PATH_API_V1: &str = "/api/v1";
