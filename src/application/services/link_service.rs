//! Link creation and resolution service.

use std::sync::Arc;
use tracing::{debug, info};

use crate::api::PATH_API_V1;
use crate::domain::repositories::LinkStore;
use crate::error::AppError;
use crate::utils::url_validator::validate_absolute_url;

/// A freshly created short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedLink {
    pub code: String,
    pub short_url: String,
}

/// Service for creating and resolving short links.
///
/// The store is injected, so a persistent backend can replace the in-memory
/// one without touching handlers.
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the externally visible service origin, e.g.
    /// `http://127.0.0.1:18080`. A trailing slash is ignored.
    pub fn new(store: Arc<dyn LinkStore>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { store, base_url }
    }

    /// Validates `long_url` and stores it under a new code.
    ///
    /// Identical URLs are not deduplicated; every call issues a new code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingUrl`] for an empty input,
    /// [`AppError::InvalidUrl`] if it is not an absolute URL, and
    /// [`AppError::Store`] if the store fails.
    pub fn shorten(&self, long_url: &str) -> Result<ShortenedLink, AppError> {
        if long_url.is_empty() {
            return Err(AppError::MissingUrl);
        }

        validate_absolute_url(long_url).map_err(|reason| AppError::InvalidUrl {
            url: long_url.to_string(),
            reason,
        })?;

        let code = self.store.put(long_url)?;
        let short_url = self.short_url(&code);

        info!(%short_url, "Shortened URL");

        Ok(ShortenedLink { code, short_url })
    }

    /// Returns the target URL stored for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code was never issued.
    pub fn resolve(&self, code: &str) -> Result<String, AppError> {
        let entry = self
            .store
            .get(code)?
            .ok_or_else(|| AppError::NotFound(code.to_string()))?;

        debug!(code, target = %entry.target, "Resolved short URL");

        Ok(entry.target)
    }

    /// Number of links issued so far.
    pub fn link_count(&self) -> Result<usize, AppError> {
        Ok(self.store.len()?)
    }

    /// Builds the public short URL: `<base_url>/api/v1/<code>`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}{}/{}", self.base_url, PATH_API_V1, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortLinkEntry;
    use crate::domain::repositories::{MockLinkStore, StoreError};

    fn service_with(store: MockLinkStore) -> LinkService {
        LinkService::new(Arc::new(store), "http://s.test/")
    }

    #[test]
    fn test_shorten_success() {
        let mut mock_store = MockLinkStore::new();
        mock_store
            .expect_put()
            .withf(|target| target == "https://example.com/page")
            .times(1)
            .returning(|_| Ok("abc123".to_string()));

        let service = service_with(mock_store);

        let link = service.shorten("https://example.com/page").unwrap();

        assert_eq!(link.code, "abc123");
        assert_eq!(link.short_url, "http://s.test/api/v1/abc123");
    }

    #[test]
    fn test_shorten_keeps_url_verbatim() {
        let mut mock_store = MockLinkStore::new();
        mock_store
            .expect_put()
            .withf(|target| target == "HTTPS://Example.COM:443/Path#frag")
            .times(1)
            .returning(|_| Ok("abc123".to_string()));

        let service = service_with(mock_store);

        assert!(service.shorten("HTTPS://Example.COM:443/Path#frag").is_ok());
    }

    #[test]
    fn test_shorten_empty_url() {
        let mut mock_store = MockLinkStore::new();
        mock_store.expect_put().times(0);

        let service = service_with(mock_store);

        assert!(matches!(service.shorten(""), Err(AppError::MissingUrl)));
    }

    #[test]
    fn test_shorten_invalid_url_never_stores() {
        let mut mock_store = MockLinkStore::new();
        mock_store.expect_put().times(0);

        let service = service_with(mock_store);

        for input in ["not-a-url", "/relative/path", "mailto:a@b.c", "example.com"] {
            let result = service.shorten(input);
            assert!(
                matches!(result, Err(AppError::InvalidUrl { .. })),
                "'{}' should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_shorten_store_failure() {
        let mut mock_store = MockLinkStore::new();
        mock_store
            .expect_put()
            .times(1)
            .returning(|_| Err(StoreError::CodeSpaceExhausted { attempts: 9 }));

        let service = service_with(mock_store);

        assert!(matches!(
            service.shorten("https://example.com"),
            Err(AppError::Store(_))
        ));
    }

    #[test]
    fn test_resolve_found() {
        let mut mock_store = MockLinkStore::new();
        mock_store
            .expect_get()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|code| Ok(Some(ShortLinkEntry::new(code, "https://example.com"))));

        let service = service_with(mock_store);

        assert_eq!(service.resolve("abc123").unwrap(), "https://example.com");
    }

    #[test]
    fn test_resolve_not_found() {
        let mut mock_store = MockLinkStore::new();
        mock_store.expect_get().times(1).returning(|_| Ok(None));

        let service = service_with(mock_store);

        let err = service.resolve("missing").unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref code) if code == "missing"));
        assert_eq!(err.to_string(), "Short URL not found - missing");
    }

    #[test]
    fn test_link_count() {
        let mut mock_store = MockLinkStore::new();
        mock_store.expect_len().times(1).returning(|| Ok(7));

        let service = service_with(mock_store);

        assert_eq!(service.link_count().unwrap(), 7);
    }
}
