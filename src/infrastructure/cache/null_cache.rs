//! No-op page cache for deployments without a shared page cache.

use super::service::{CacheResult, PageCache};
use async_trait::async_trait;
use tracing::debug;

/// A page cache that stores nothing.
///
/// Every delete succeeds immediately, so the page cache backend still
/// reports each URL as processed.
///
/// # Use Cases
///
/// - Development environments without Redis
/// - Fallback when the Redis connection fails at startup
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (page cache disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageCache for NullCache {
    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn describe(&self) -> &'static str {
        "No-op page cache"
    }
}
