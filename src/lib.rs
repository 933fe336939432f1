//! # Lynkly
//!
//! A minimal URL shortening service built with Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Short link entity and the [`domain::repositories::LinkStore`] trait
//! - **Application Layer** ([`application`]) - URL validation and link orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory store
//! - **API Layer** ([`api`]) - Response model, dispatch wrapper, handlers and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://127.0.0.1:18080"
//! cargo run
//!
//! curl -d url=https://example.com/page http://127.0.0.1:18080/api/v1/shorten
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::api::dispatch::{ApiRouter, HandlerRequest};
    pub use crate::api::response::{HttpResponse, IntoHttpResponse, ResponseError};
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::ShortLinkEntry;
    pub use crate::domain::repositories::LinkStore;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
