//! Repository trait for the flood-control event log.

use crate::domain::entities::FloodEvent;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Errors raised by flood event storage.
#[derive(Debug, thiserror::Error)]
pub enum FloodStoreError {
    #[error("Flood store database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Flood store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only, timestamped event log keyed by `(event, identifier)`.
///
/// The store does not enforce limits itself. Counting and appending are
/// separate calls, so two concurrent callers can both observe a count below
/// the limit before either registers.
///
/// # Implementations
///
/// - [`crate::infrastructure::flood::PgFloodRepository`] - PostgreSQL table
/// - [`crate::infrastructure::flood::MemoryFloodRepository`] - process-local log
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FloodRepository: Send + Sync {
    /// Counts registrations for `(event, identifier)` with a timestamp
    /// strictly after `since`.
    ///
    /// # Errors
    ///
    /// Returns [`FloodStoreError`] if the store cannot be queried.
    async fn count_since(
        &self,
        event: &str,
        identifier: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, FloodStoreError>;

    /// Appends one registration.
    ///
    /// # Errors
    ///
    /// Returns [`FloodStoreError`] if the event cannot be stored.
    async fn register(&self, event: FloodEvent) -> Result<(), FloodStoreError>;

    /// Removes every registration for `(event, identifier)` and returns how
    /// many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`FloodStoreError`] if the store cannot be modified.
    async fn clear(&self, event: &str, identifier: &str) -> Result<u64, FloodStoreError>;

    /// Physically deletes registrations whose expiration is before `now`.
    ///
    /// # Errors
    ///
    /// Returns [`FloodStoreError`] if the store cannot be modified.
    async fn garbage_collect(&self, now: DateTime<Utc>) -> Result<u64, FloodStoreError>;

    /// Checks if the store is reachable.
    async fn health_check(&self) -> bool;
}
