//! Storage trait for short links.

use crate::domain::entities::ShortLinkEntry;

/// Errors raised by a [`LinkStore`] backend.
///
/// None of these are safe to show to API clients; handlers map them to a
/// generic `500` response.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("random source unavailable: {0}")]
    Entropy(String),

    #[error("no unused short code found after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },
}

/// Storage interface for short links.
///
/// The store owns code generation: `put` allocates a fresh code that is not
/// in use and never overwrites an existing entry.
///
/// Implementations must be safe to call from any number of request-handling
/// threads at once.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - In-process map behind a mutex
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait LinkStore: Send + Sync {
    /// Stores `target` under a newly generated code and returns the code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Entropy`] if the random source fails, or
    /// [`StoreError::CodeSpaceExhausted`] if every generated code collided.
    fn put(&self, target: &str) -> Result<String, StoreError>;

    /// Looks up the entry for `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(entry))` if found
    /// - `Ok(None)` if the code was never issued
    fn get(&self, code: &str) -> Result<Option<ShortLinkEntry>, StoreError>;

    /// Number of stored links.
    fn len(&self) -> Result<usize, StoreError>;
}
