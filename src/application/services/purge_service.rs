//! Manual purge orchestration.

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::fanout::FanoutPurger;
use super::flood_service::FloodGuard;
use crate::domain::entities::{PurgeBatch, PurgeReport};
use crate::domain::ports::PurgeListener;
use crate::domain::repositories::FloodStoreError;
use crate::utils::interval::format_interval;
use crate::utils::url_validator::ValidationError;

/// Flood event name, also used as the identifier of the shared admin bucket.
pub const FLOOD_EVENT: &str = "custom_purge_url_purger";

const SECONDS_PER_HOUR: u64 = 3600;

/// Why a submission was rejected before any backend was contacted.
#[derive(Debug, thiserror::Error)]
pub enum PurgeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("You cannot clear more than {limit} cache entries in {interval}. Try again later.")]
    FloodLimitExceeded { limit: u64, interval: String },

    #[error("Flood store error: {0}")]
    Storage(#[from] FloodStoreError),
}

/// Limits applied to manual purges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeSettings {
    pub max_url_per_request: usize,
    pub flood_limit: u64,
    pub flood_interval_hours: u64,
}

impl PurgeSettings {
    pub fn flood_window_secs(&self) -> u64 {
        self.flood_interval_hours.saturating_mul(SECONDS_PER_HOUR)
    }
}

impl Default for PurgeSettings {
    fn default() -> Self {
        Self {
            max_url_per_request: 25,
            flood_limit: 100,
            flood_interval_hours: 24,
        }
    }
}

/// Current usage of the flood budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloodStatus {
    pub count: u64,
    pub limit: u64,
    pub interval_seconds: u64,
    /// Window rendered for humans, e.g. `"1 day"`.
    pub interval: String,
    pub allowed: bool,
}

impl FloodStatus {
    /// The line shown above the purge form.
    pub fn summary(&self) -> String {
        format!(
            "You already cleared {} of {} cache entries in {}.",
            self.count, self.limit, self.interval
        )
    }
}

/// Validate, flood check, fan out, notify, register.
pub struct PurgeService {
    fanout: FanoutPurger,
    flood: FloodGuard,
    listeners: Vec<Arc<dyn PurgeListener>>,
    settings: PurgeSettings,
}

impl PurgeService {
    pub fn new(
        fanout: FanoutPurger,
        flood: FloodGuard,
        listeners: Vec<Arc<dyn PurgeListener>>,
        settings: PurgeSettings,
    ) -> Self {
        Self {
            fanout,
            flood,
            listeners,
            settings,
        }
    }

    pub fn settings(&self) -> &PurgeSettings {
        &self.settings
    }

    pub fn flood(&self) -> &FloodGuard {
        &self.flood
    }

    /// Purges a raw submission under flood control.
    ///
    /// One flood event is registered per submitted URL once the backends
    /// have run, whatever their outcome. A flood log failure at that point
    /// is logged and the report is still returned.
    ///
    /// # Errors
    ///
    /// - [`PurgeError::FloodLimitExceeded`] if `identifier` used up its budget
    /// - [`PurgeError::Validation`] if the submission is rejected
    /// - [`PurgeError::Storage`] if the flood log cannot be queried
    ///
    /// Backend failures are never errors; they are reported in the
    /// returned [`PurgeReport`].
    pub async fn purge_urls(&self, raw: &str, identifier: &str) -> Result<PurgeReport, PurgeError> {
        let window = self.settings.flood_window_secs();

        if !self
            .flood
            .is_allowed(FLOOD_EVENT, self.settings.flood_limit, window, identifier)
            .await?
        {
            warn!(identifier, limit = self.settings.flood_limit, "Purge flood limit reached");
            return Err(PurgeError::FloodLimitExceeded {
                limit: self.settings.flood_limit,
                interval: format_interval(window, 2),
            });
        }

        let batch = PurgeBatch::parse(raw, self.settings.max_url_per_request)?;
        let report = self.run(&batch).await;

        for (registered, _) in batch.iter().enumerate() {
            if let Err(e) = self.flood.register(FLOOD_EVENT, window, identifier).await {
                error!(
                    identifier,
                    registered,
                    total = batch.len(),
                    error = %e,
                    "Failed to register purge in flood log"
                );
                break;
            }
        }

        Ok(report)
    }

    /// Purges a raw submission without consulting or feeding flood control.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeError::Validation`] if the submission is rejected.
    pub async fn purge_unthrottled(&self, raw: &str) -> Result<PurgeReport, PurgeError> {
        let batch = PurgeBatch::parse(raw, self.settings.max_url_per_request)?;
        Ok(self.run(&batch).await)
    }

    /// Flood budget usage for `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeError::Storage`] if the flood log is unavailable.
    pub async fn flood_status(&self, identifier: &str) -> Result<FloodStatus, PurgeError> {
        let window = self.settings.flood_window_secs();
        let count = self.flood.count(FLOOD_EVENT, window, identifier).await?;

        Ok(FloodStatus {
            count,
            limit: self.settings.flood_limit,
            interval_seconds: window,
            interval: format_interval(window, 2),
            allowed: count < self.settings.flood_limit,
        })
    }

    async fn run(&self, batch: &PurgeBatch) -> PurgeReport {
        info!(urls = batch.len(), "Purging URLs");

        let report = self.fanout.purge_all(batch).await;

        for listener in &self.listeners {
            listener.on_manual_purge(batch.urls()).await;
        }

        report
    }
}
