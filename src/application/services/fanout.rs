//! Dispatch of one batch to every enabled backend.

use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::{Backend, BackendResult, PurgeBatch, PurgeReport};
use crate::domain::ports::Purger;

/// Runs every registered purger on the same batch and aggregates the
/// outcomes.
///
/// Purgers run concurrently and never affect each other: a purger that
/// fails or is misconfigured only shows up in its own [`BackendResult`].
/// There is no rollback across backends.
#[derive(Clone, Default)]
pub struct FanoutPurger {
    purgers: Vec<Arc<dyn Purger>>,
}

impl FanoutPurger {
    pub fn new(purgers: Vec<Arc<dyn Purger>>) -> Self {
        Self { purgers }
    }

    /// Backends that take part in a purge, in registration order.
    pub fn backends(&self) -> Vec<Backend> {
        self.purgers.iter().map(|p| p.backend()).collect()
    }

    pub async fn purge_all(&self, batch: &PurgeBatch) -> PurgeReport {
        let outcomes = join_all(self.purgers.iter().map(|purger| async move {
            let result = purger.purge(batch).await;
            (purger.backend(), result)
        }))
        .await;

        let mut report = PurgeReport::new();
        for (backend, result) in outcomes {
            log_outcome(backend, &result);
            report.insert(backend, result);
        }
        report
    }
}

fn log_outcome(backend: Backend, result: &BackendResult) {
    if result.is_skipped() {
        info!(backend = %backend, "Purge skipped, backend not configured");
    } else if result.has_errors() {
        warn!(
            backend = %backend,
            processed = result.processed.len(),
            failed = ?result.errors,
            "Purge finished with errors"
        );
    } else {
        info!(
            backend = %backend,
            processed = result.processed.len(),
            "Purge finished"
        );
    }
}
