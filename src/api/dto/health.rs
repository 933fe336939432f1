//! DTOs for the health check endpoint.

use serde::Serialize;

/// Liveness report.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub links: usize,
}
