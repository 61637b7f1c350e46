//! Process-local page cache store used as a test double.

use super::service::{CacheResult, PageCache};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Page cache held in a `HashMap`.
///
/// Test double for [`PageCache`]: tests seed entries with
/// [`insert`](Self::insert) and check what the local purger deleted. The
/// server never selects it, since pages rendered by other processes cannot
/// live in this process's memory; without Redis it uses
/// [`NullCache`](super::NullCache).
#[derive(Debug, Default)]
pub struct MemoryPageCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryPageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a rendered page under `key`.
    pub fn insert(&self, key: impl Into<String>, body: impl Into<String>) {
        self.lock().insert(key.into(), body.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still structurally valid.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PageCache for MemoryPageCache {
    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.lock().remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn describe(&self) -> &'static str {
        "In-memory page cache"
    }
}
