//! HTTP request handlers.
//!
//! Handlers are plain functions `(state, request) -> response` registered
//! through [`crate::api::dispatch::ApiRouter`].

pub mod health;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
