//! Sliding-window flood control.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::FloodEvent;
use crate::domain::ports::Clock;
use crate::domain::repositories::{FloodRepository, FloodStoreError};

/// Rate limiter counting registrations per `(event, identifier)` inside a
/// rolling window ending now.
///
/// [`is_allowed`](Self::is_allowed) and [`register`](Self::register) are
/// separate calls. Concurrent callers may both be allowed before either
/// registers, which can overrun the limit.
pub struct FloodGuard {
    repository: Arc<dyn FloodRepository>,
    clock: Arc<dyn Clock>,
}

impl FloodGuard {
    pub fn new(repository: Arc<dyn FloodRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Returns true iff fewer than `limit` registrations fall inside the
    /// window.
    ///
    /// # Errors
    ///
    /// Returns [`FloodStoreError`] if the event log cannot be queried.
    pub async fn is_allowed(
        &self,
        event: &str,
        limit: u64,
        window_secs: u64,
        identifier: &str,
    ) -> Result<bool, FloodStoreError> {
        let count = self.count(event, window_secs, identifier).await?;
        Ok(count < limit)
    }

    /// Appends one registration. The limit is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`FloodStoreError`] if the event cannot be stored.
    pub async fn register(
        &self,
        event: &str,
        window_secs: u64,
        identifier: &str,
    ) -> Result<(), FloodStoreError> {
        let entry = FloodEvent::new(event, identifier, self.clock.now(), window(window_secs));
        self.repository.register(entry).await
    }

    /// Number of registrations inside the window.
    ///
    /// # Errors
    ///
    /// Returns [`FloodStoreError`] if the event log cannot be queried.
    pub async fn count(
        &self,
        event: &str,
        window_secs: u64,
        identifier: &str,
    ) -> Result<u64, FloodStoreError> {
        let since = self
            .clock
            .now()
            .checked_sub_signed(window(window_secs))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.repository.count_since(event, identifier, since).await
    }

    /// Drops every registration for `(event, identifier)`.
    ///
    /// # Errors
    ///
    /// Returns [`FloodStoreError`] if the event log cannot be modified.
    pub async fn clear(&self, event: &str, identifier: &str) -> Result<u64, FloodStoreError> {
        self.repository.clear(event, identifier).await
    }

    /// Physically deletes expired registrations.
    ///
    /// # Errors
    ///
    /// Returns [`FloodStoreError`] if the event log cannot be modified.
    pub async fn garbage_collect(&self) -> Result<u64, FloodStoreError> {
        self.repository.garbage_collect(self.clock.now()).await
    }

    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}

fn window(window_secs: u64) -> Duration {
    i64::try_from(window_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}
