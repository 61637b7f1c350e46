//! Page cache store trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during page cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// The application-level store holding rendered pages.
///
/// Entries are keyed by `<url>:html`. The purge core only ever deletes.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisPageCache`] - Redis-backed store
/// - [`crate::infrastructure::cache::MemoryPageCache`] - process-local store
/// - [`crate::infrastructure::cache::NullCache`] - No-op store for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Deletes a cache entry.
    ///
    /// Deleting a key that does not exist is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the store cannot be reached.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short description used by health reporting.
    fn describe(&self) -> &'static str;
}
