//! Redis-backed page cache store.

use super::service::{CacheError, CacheResult, PageCache};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Page cache entries stored in Redis under a namespace prefix.
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnects.
pub struct RedisPageCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisPageCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key_prefix` - Namespace prepended to every key (e.g., `"cache_page:"`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, key_prefix: &str) -> CacheResult<Self> {
        info!("Connecting to Redis page cache");

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

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: key_prefix.to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl PageCache for RedisPageCache {
    async fn delete(&self, key: &str) -> CacheResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let deleted = conn
            .del::<_, i32>(&full_key)
            .await
            .map_err(|e| CacheError::OperationError(format!("DEL {}: {}", full_key, e)))?;

        if deleted > 0 {
            debug!("Cache DELETE: {}", full_key);
        } else {
            debug!("Cache DELETE (absent): {}", full_key);
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn describe(&self) -> &'static str {
        "Redis"
    }
}
