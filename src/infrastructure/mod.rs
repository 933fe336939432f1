//! Infrastructure layer implementing domain storage contracts.
//!
//! - [`persistence`] - Link store implementations

pub mod persistence;
