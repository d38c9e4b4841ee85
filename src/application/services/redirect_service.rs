//! Redirect resolution: cache lookup, store fallback, click bookkeeping.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::ShortUrl;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Where the target URL of a redirect came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    Cache,
    Store,
}

/// Outcome of a successful redirect resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub target_url: String,
    /// Click count after this redirect was counted.
    pub clicks: i64,
    pub source: LookupSource,
}

/// Resolves short keys to target URLs and counts the click.
///
/// The cache answers "where does this key go"; the store stays the only
/// place clicks are counted. A cache hit therefore still reads the record
/// from the store, to increment it.
///
/// # Flow
///
/// 1. Look the key up in the cache (an error counts as a miss)
/// 2. **Hit**: load the active record, increment clicks, use the cached target
/// 3. **Miss**: load the active record, write it to the cache, increment clicks
///
/// The increment is awaited before returning, exactly once per request that
/// resolves to an active record.
pub struct RedirectService<R: UrlRepository> {
    url_repository: Arc<R>,
    cache: Arc<dyn CacheService>,
}

impl<R: UrlRepository> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(url_repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            url_repository,
            cache,
        }
    }

    /// Resolves `key` and records one click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active record has this key; no
    /// record is modified in that case. Store faults propagate unchanged.
    pub async fn resolve(&self, key: &str) -> Result<ResolvedUrl, AppError> {
        let cached = match self.cache.get_url(key).await {
            Ok(cached) => cached,
            Err(e) => {
                warn!(key, "Cache lookup failed, falling back to store: {}", e);
                None
            }
        };

        match cached {
            Some(target_url) => {
                debug!(key, "Cache HIT");
                self.resolve_cached(key, target_url).await
            }
            None => {
                debug!(key, "Cache MISS");
                self.resolve_from_store(key).await
            }
        }
    }

    async fn resolve_cached(&self, key: &str, target_url: String) -> Result<ResolvedUrl, AppError> {
        let Some(url) = self.url_repository.find_by_key(key).await? else {
            // Cached key without an active record: drop the entry.
            if let Err(e) = self.cache.invalidate(key).await {
                warn!(key, "Failed to invalidate stale cache entry: {}", e);
            }
            return Err(AppError::url_not_found());
        };

        let updated = self.count_click(&url).await?;

        Ok(ResolvedUrl {
            target_url,
            clicks: updated.clicks,
            source: LookupSource::Cache,
        })
    }

    async fn resolve_from_store(&self, key: &str) -> Result<ResolvedUrl, AppError> {
        let url = self
            .url_repository
            .find_by_key(key)
            .await?
            .ok_or_else(AppError::url_not_found)?;

        if let Err(e) = self.cache.set_url(&url.key, &url.target_url).await {
            warn!(key, "Failed to populate cache: {}", e);
        }

        let updated = self.count_click(&url).await?;

        Ok(ResolvedUrl {
            target_url: url.target_url,
            clicks: updated.clicks,
            source: LookupSource::Store,
        })
    }

    async fn count_click(&self, url: &ShortUrl) -> Result<ShortUrl, AppError> {
        let updated = self.url_repository.increment_clicks(url).await?;
        debug!(key = %updated.key, clicks = updated.clicks, "Click recorded");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::cache::{CacheError, MockCacheService};
    use chrono::Utc;

    fn active_url(key: &str, target: &str, clicks: i64) -> ShortUrl {
        ShortUrl {
            id: 42,
            key: key.to_string(),
            secret_key: format!("{key}_secretsuffix"),
            target_url: target.to_string(),
            is_active: true,
            clicks,
            created_at: Utc::now(),
        }
    }

    fn incremented(url: &ShortUrl) -> ShortUrl {
        ShortUrl {
            clicks: url.clicks + 1,
            ..url.clone()
        }
    }

    fn service(repo: MockUrlRepository, cache: MockCacheService) -> RedirectService<MockUrlRepository> {
        RedirectService::new(Arc::new(repo), Arc::new(cache))
    }

    #[tokio::test]
    async fn test_cache_hit_uses_cached_target_and_counts_click() {
        let mut repo = MockUrlRepository::new();
        let mut cache = MockCacheService::new();

        cache
            .expect_get_url()
            .withf(|key| key == "abc1234")
            .times(1)
            .returning(|_| Ok(Some("https://cached.example.com".to_string())));
        cache.expect_set_url().times(0);

        repo.expect_find_by_key()
            .times(1)
            .returning(|key| Ok(Some(active_url(key, "https://cached.example.com", 4))));
        repo.expect_increment_clicks()
            .times(1)
            .returning(|url| Ok(incremented(url)));

        let resolved = service(repo, cache).resolve("abc1234").await.unwrap();

        assert_eq!(resolved.target_url, "https://cached.example.com");
        assert_eq!(resolved.clicks, 5);
        assert_eq!(resolved.source, LookupSource::Cache);
    }

    #[tokio::test]
    async fn test_cache_miss_populates_cache_and_counts_click() {
        let mut repo = MockUrlRepository::new();
        let mut cache = MockCacheService::new();

        cache.expect_get_url().times(1).returning(|_| Ok(None));
        cache
            .expect_set_url()
            .withf(|key, target| key == "abc1234" && target == "https://example.com")
            .times(1)
            .returning(|_, _| Ok(()));

        repo.expect_find_by_key()
            .times(1)
            .returning(|key| Ok(Some(active_url(key, "https://example.com", 0))));
        repo.expect_increment_clicks()
            .times(1)
            .returning(|url| Ok(incremented(url)));

        let resolved = service(repo, cache).resolve("abc1234").await.unwrap();

        assert_eq!(resolved.target_url, "https://example.com");
        assert_eq!(resolved.clicks, 1);
        assert_eq!(resolved.source, LookupSource::Store);
    }

    #[tokio::test]
    async fn test_unknown_key_is_not_found_and_mutates_nothing() {
        let mut repo = MockUrlRepository::new();
        let mut cache = MockCacheService::new();

        cache.expect_get_url().times(1).returning(|_| Ok(None));
        cache.expect_set_url().times(0);

        repo.expect_find_by_key().times(1).returning(|_| Ok(None));
        repo.expect_increment_clicks().times(0);

        let result = service(repo, cache).resolve("missing").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_cache_error_degrades_to_store() {
        let mut repo = MockUrlRepository::new();
        let mut cache = MockCacheService::new();

        cache
            .expect_get_url()
            .times(1)
            .returning(|_| Err(CacheError::ConnectionError("refused".to_string())));
        cache
            .expect_set_url()
            .times(1)
            .returning(|_, _| Err(CacheError::ConnectionError("refused".to_string())));

        repo.expect_find_by_key()
            .times(1)
            .returning(|key| Ok(Some(active_url(key, "https://example.com", 9))));
        repo.expect_increment_clicks()
            .times(1)
            .returning(|url| Ok(incremented(url)));

        let resolved = service(repo, cache).resolve("abc1234").await.unwrap();

        assert_eq!(resolved.target_url, "https://example.com");
        assert_eq!(resolved.clicks, 10);
    }

    #[tokio::test]
    async fn test_stale_cache_entry_is_invalidated() {
        let mut repo = MockUrlRepository::new();
        let mut cache = MockCacheService::new();

        cache
            .expect_get_url()
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));
        cache
            .expect_invalidate()
            .withf(|key| key == "abc1234")
            .times(1)
            .returning(|_| Ok(()));

        repo.expect_find_by_key().times(1).returning(|_| Ok(None));
        repo.expect_increment_clicks().times(0);

        let result = service(repo, cache).resolve("abc1234").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_store_error_is_not_reported_as_not_found() {
        let mut repo = MockUrlRepository::new();
        let mut cache = MockCacheService::new();

        cache.expect_get_url().times(1).returning(|_| Ok(None));

        repo.expect_find_by_key()
            .times(1)
            .returning(|_| Err(AppError::unavailable("Database unavailable")));

        let result = service(repo, cache).resolve("abc1234").await;

        assert!(matches!(result.unwrap_err(), AppError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_increment_failure_propagates() {
        let mut repo = MockUrlRepository::new();
        let mut cache = MockCacheService::new();

        cache
            .expect_get_url()
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        repo.expect_find_by_key()
            .times(1)
            .returning(|key| Ok(Some(active_url(key, "https://example.com", 0))));
        repo.expect_increment_clicks()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", serde_json::json!({}))));

        let result = service(repo, cache).resolve("abc1234").await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }
}
