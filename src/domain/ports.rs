//! Interfaces the purge core consumes.
//!
//! Infrastructure provides the concrete adapters: backend purgers in
//! `crate::infrastructure::purgers`, clocks in `crate::infrastructure::clock`
//! and listeners in `crate::infrastructure::listeners`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

use crate::domain::entities::{Backend, BackendResult, PurgeBatch};

/// Source of the current time for flood-window arithmetic.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// A single cache layer that can invalidate a batch of URLs.
///
/// Implementations never fail as a whole: transport errors, HTTP errors and
/// missing configuration are folded into the returned [`BackendResult`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Purger: Send + Sync {
    /// The backend this purger talks to.
    fn backend(&self) -> Backend;

    /// Purges every URL of the batch from this backend.
    async fn purge(&self, batch: &PurgeBatch) -> BackendResult;
}

/// Receives the list of URLs after every manual purge.
///
/// Listeners are notified fire-and-forget; their order is unspecified and
/// nothing they do is reported back to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurgeListener: Send + Sync {
    async fn on_manual_purge(&self, urls: &[String]);
}
