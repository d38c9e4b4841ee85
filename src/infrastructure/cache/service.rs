//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key to target URL cache in front of the store.
///
/// Only target URLs are cached, never click counts. Target URLs are immutable
/// once created, so an entry written from the store never goes stale while
/// its record stays active.
///
/// Errors are returned to the caller rather than swallowed; the redirect path
/// treats any error as a miss and carries on against the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with optional TTL
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached target URL for `key`, or `None` on a miss.
    async fn get_url(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `key -> target_url`, overwriting any previous entry.
    async fn set_url(&self, key: &str, target_url: &str) -> CacheResult<()>;

    /// Removes the entry for `key`, if any.
    async fn invalidate(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
