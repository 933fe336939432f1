//! Application layer services implementing business logic.
//!
//! Services consume storage traits and provide a clean API for HTTP handlers.
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution

pub mod services;
