//! Shared application state.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::MemoryLinkStore;

/// State injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>) -> Self {
        Self { link_service }
    }

    /// State backed by a fresh [`MemoryLinkStore`].
    pub fn in_memory(base_url: &str) -> Self {
        let store = Arc::new(MemoryLinkStore::new());
        Self::new(Arc::new(LinkService::new(store, base_url)))
    }
}
