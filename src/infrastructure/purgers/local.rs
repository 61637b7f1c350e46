//! Purger for the application-level page cache.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::{Backend, BackendResult, PurgeBatch};
use crate::domain::ports::Purger;
use crate::infrastructure::cache::PageCache;

/// Suffix identifying the rendered-HTML variant of a cached page.
pub const PAGE_VARIANT_SUFFIX: &str = ":html";

/// Derives the page cache key for a URL.
pub fn cache_key(url: &str) -> String {
    format!("{url}{PAGE_VARIANT_SUFFIX}")
}

/// Deletes the rendered page of every URL from the page cache.
///
/// Deletion is delete-if-exists, so every URL is reported as processed.
/// Store errors are logged and do not change the outcome.
pub struct LocalCachePurger {
    cache: Arc<dyn PageCache>,
}

impl LocalCachePurger {
    pub fn new(cache: Arc<dyn PageCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl Purger for LocalCachePurger {
    fn backend(&self) -> Backend {
        Backend::PageCache
    }

    async fn purge(&self, batch: &PurgeBatch) -> BackendResult {
        for url in batch {
            let key = cache_key(url);
            if let Err(e) = self.cache.delete(&key).await {
                warn!(key = %key, error = %e, "Page cache delete failed");
            }
        }

        BackendResult::all_processed(batch)
    }
}
