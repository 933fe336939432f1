//! In-process implementation of the link store.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, warn};

use crate::domain::entities::ShortLinkEntry;
use crate::domain::repositories::{LinkStore, StoreError};
use crate::utils::code_generator::{CODE_LENGTH_BYTES, WIDE_CODE_LENGTH_BYTES, generate_code};

/// Attempts with regular-width codes before widening the code space.
const MAX_ATTEMPTS: usize = 8;

/// Produces a code from the given number of random bytes.
pub type CodeGenerator = fn(usize) -> Result<String, getrandom::Error>;

/// Link store backed by a `HashMap` behind a single mutex.
///
/// Codes are generated outside the lock; the lock is only held for the
/// vacancy check and insert, so no caller blocks while holding it.
///
/// Nothing is persisted and nothing is evicted: entries live as long as the
/// store does.
pub struct MemoryLinkStore {
    links: Mutex<HashMap<String, ShortLinkEntry>>,
    generator: CodeGenerator,
}

impl MemoryLinkStore {
    /// Creates an empty store using OS randomness for codes.
    pub fn new() -> Self {
        Self::with_generator(generate_code)
    }

    /// Creates an empty store with a custom code generator.
    pub fn with_generator(generator: CodeGenerator) -> Self {
        Self {
            links: Mutex::new(HashMap::new()),
            generator,
        }
    }

    fn generate(&self, width: usize) -> Result<String, StoreError> {
        (self.generator)(width).map_err(|e| StoreError::Entropy(e.to_string()))
    }

    /// Inserts under `code` if it is unused. Returns `false` on collision.
    fn try_insert(&self, code: &str, target: &str) -> bool {
        let mut links = self.links.lock();

        match links.entry(code.to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(ShortLinkEntry::new(code, target));
                true
            }
            Entry::Occupied(_) => false,
        }
    }
}

impl Default for MemoryLinkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkStore for MemoryLinkStore {
    fn put(&self, target: &str) -> Result<String, StoreError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let code = self.generate(CODE_LENGTH_BYTES)?;

            if self.try_insert(&code, target) {
                debug!(code = %code, attempt, "Stored short link");
                return Ok(code);
            }

            warn!(code = %code, attempt, "Short code collision, retrying");
        }

        let code = self.generate(WIDE_CODE_LENGTH_BYTES)?;

        if self.try_insert(&code, target) {
            warn!(code = %code, "Stored short link with widened code");
            return Ok(code);
        }

        Err(StoreError::CodeSpaceExhausted {
            attempts: MAX_ATTEMPTS + 1,
        })
    }

    fn get(&self, code: &str) -> Result<Option<ShortLinkEntry>, StoreError> {
        Ok(self.links.lock().get(code).cloned())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.links.lock().len())
    }
}
