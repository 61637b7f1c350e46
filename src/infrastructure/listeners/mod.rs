//! Built-in manual purge listeners.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::PurgeListener;

/// Writes an audit line for every manual purge.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPurgeListener;

#[async_trait]
impl PurgeListener for TracingPurgeListener {
    async fn on_manual_purge(&self, urls: &[String]) {
        info!(count = urls.len(), urls = ?urls, "Manual purge requested");
    }
}
