//! Page cache stores the local purger deletes from.
//!
//! Provides a [`PageCache`] trait with three implementations:
//! - [`RedisPageCache`] - Production Redis-backed store
//! - [`MemoryPageCache`] - Process-local test double, never selected by the server
//! - [`NullCache`] - No-op implementation for disabled caching

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryPageCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisPageCache;
pub use service::{CacheError, CacheResult, PageCache};

#[cfg(test)]
pub use service::MockPageCache;
