//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Redis cache for key to target URL lookups.
///
/// `ConnectionManager` multiplexes one connection across all requests and
/// reconnects on failure, so cloning it per call is cheap.
pub struct RedisCache {
    client: ConnectionManager,
    ttl_seconds: Option<u64>,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `ttl_seconds` - expiry applied to every entry; `None` keeps entries
    ///   until Redis evicts them (`CACHE_TTL_SECONDS`)
    /// - `key_prefix` - namespace prepended to every key (`REDIS_KEY_PREFIX`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(
        redis_url: &str,
        ttl_seconds: Option<u64>,
        key_prefix: impl Into<String>,
    ) -> CacheResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds,
            key_prefix: key_prefix.into(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        let cached = conn
            .get::<_, Option<String>>(self.build_key(key))
            .await
            .map_err(|e| CacheError::OperationError(format!("GET {}: {}", key, e)))?;

        debug!(key, hit = cached.is_some(), "Redis GET");
        Ok(cached)
    }

    async fn set_url(&self, key: &str, target_url: &str) -> CacheResult<()> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        let result = match self.ttl_seconds {
            Some(ttl) => conn.set_ex::<_, _, ()>(&redis_key, target_url, ttl).await,
            None => conn.set::<_, _, ()>(&redis_key, target_url).await,
        };
        result.map_err(|e| CacheError::OperationError(format!("SET {}: {}", key, e)))?;

        debug!(key, ttl = ?self.ttl_seconds, "Redis SET");
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.client.clone();

        let deleted = conn
            .del::<_, i32>(self.build_key(key))
            .await
            .map_err(|e| CacheError::OperationError(format!("DEL {}: {}", key, e)))?;

        if deleted > 0 {
            debug!(key, "Redis DEL");
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
