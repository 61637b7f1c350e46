//! Process-local flood event log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::FloodEvent;
use crate::domain::repositories::{FloodRepository, FloodStoreError};

/// Flood log kept in memory.
///
/// Registrations are lost on restart, so the limit only holds per process.
/// Used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryFloodRepository {
    events: Mutex<Vec<FloodEvent>>,
}

impl MemoryFloodRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored registrations, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<FloodEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl FloodRepository for MemoryFloodRepository {
    async fn count_since(
        &self,
        event: &str,
        identifier: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, FloodStoreError> {
        let count = self
            .lock()
            .iter()
            .filter(|e| e.event == event && e.identifier == identifier && e.timestamp > since)
            .count();
        Ok(count as u64)
    }

    async fn register(&self, event: FloodEvent) -> Result<(), FloodStoreError> {
        self.lock().push(event);
        Ok(())
    }

    async fn clear(&self, event: &str, identifier: &str) -> Result<u64, FloodStoreError> {
        let mut events = self.lock();
        let before = events.len();
        events.retain(|e| !(e.event == event && e.identifier == identifier));
        Ok((before - events.len()) as u64)
    }

    async fn garbage_collect(&self, now: DateTime<Utc>) -> Result<u64, FloodStoreError> {
        let mut events = self.lock();
        let before = events.len();
        events.retain(|e| e.expiration >= now);
        Ok((before - events.len()) as u64)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
