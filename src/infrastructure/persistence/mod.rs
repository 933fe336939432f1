//! Link store implementations.
//!
//! - [`MemoryLinkStore`] - Process-local map guarded by a mutex

pub mod memory_link_store;

pub use memory_link_store::{CodeGenerator, MemoryLinkStore};
