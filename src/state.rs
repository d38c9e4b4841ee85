//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{RedirectService, UrlService};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::PgUrlRepository;

/// Handles shared by all requests.
///
/// Cloning is cheap: every field is reference-counted. The database pool and
/// the cache connection behind these handles are created once in
/// [`crate::server::run`].
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<PgUrlRepository>>,
    pub redirect_service: Arc<RedirectService<PgUrlRepository>>,
    pub cache: Arc<dyn CacheService>,
    /// Public address prefixed to keys in `url` and `admin_url`, without a trailing slash.
    pub base_url: Arc<str>,
}

impl AppState {
    /// Builds the state from a repository and a cache.
    pub fn new(
        url_repository: Arc<PgUrlRepository>,
        cache: Arc<dyn CacheService>,
        base_url: &str,
    ) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(url_repository.clone())),
            redirect_service: Arc::new(RedirectService::new(url_repository, cache.clone())),
            cache,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }
}
