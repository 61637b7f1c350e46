//! Purger for the Cloudflare CDN.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use super::http::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, PurgeRequest, TlsVerification,
    send_purge_request,
};
use crate::domain::entities::{Backend, BackendResult, PurgeBatch};
use crate::domain::ports::Purger;

pub const DEFAULT_CLOUDFLARE_API_URL: &str = "https://api.cloudflare.com/client/v4";

/// Cloudflare zone credentials.
#[derive(Debug, Clone)]
pub struct CdnSettings {
    pub zone_id: String,
    pub email: String,
    pub api_key: String,
    /// API root, without trailing slash.
    pub api_url: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl CdnSettings {
    pub fn new(
        zone_id: impl Into<String>,
        email: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            zone_id: zone_id.into(),
            email: email.into(),
            api_key: api_key.into(),
            api_url: DEFAULT_CLOUDFLARE_API_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Endpoint purging files from this zone.
    pub fn purge_endpoint(&self) -> String {
        format!("{}/zones/{}/purge_cache", self.api_url, self.zone_id)
    }
}

/// Purges the whole batch with a single bulk `DELETE` call.
///
/// The outcome is all-or-nothing: HTTP 200 marks every URL processed, anything
/// else marks every URL failed. TLS verification is always enforced. Without
/// credentials the purge is skipped and reports nothing.
pub struct CdnPurger {
    settings: Option<CdnSettings>,
}

impl CdnPurger {
    pub fn new(settings: Option<CdnSettings>) -> Self {
        Self { settings }
    }

    fn build_request(settings: &CdnSettings, batch: &PurgeBatch) -> PurgeRequest {
        PurgeRequest::new(Method::DELETE, settings.purge_endpoint())
            .header("X-Auth-Email", settings.email.clone())
            .header("X-Auth-Key", settings.api_key.clone())
            .header("Content-Type", "application/json")
            .json(json!({ "files": batch.urls() }))
            .timeouts(settings.connect_timeout, settings.timeout)
            .tls(TlsVerification::STRICT)
    }
}

#[async_trait]
impl Purger for CdnPurger {
    fn backend(&self) -> Backend {
        Backend::Cloudflare
    }

    async fn purge(&self, batch: &PurgeBatch) -> BackendResult {
        let Some(settings) = &self.settings else {
            info!("Cloudflare is not configured, skipping CDN purge");
            return BackendResult::skipped();
        };

        let request = Self::build_request(settings, batch);
        match send_purge_request(&request).await {
            Ok(()) => BackendResult::all_processed(batch),
            Err(e) => {
                debug!(zone = %settings.zone_id, error = %e, "Cloudflare purge call failed");
                BackendResult::all_failed(batch)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purge_endpoint() {
        let settings = CdnSettings::new("zone123", "ops@example.com", "key");
        assert_eq!(
            settings.purge_endpoint(),
            "https://api.cloudflare.com/client/v4/zones/zone123/purge_cache"
        );

        let custom = settings.with_api_url("http://127.0.0.1:9000/client/v4/");
        assert_eq!(
            custom.purge_endpoint(),
            "http://127.0.0.1:9000/client/v4/zones/zone123/purge_cache"
        );
    }

    #[test]
    fn test_request_carries_whole_batch() {
        let settings = CdnSettings::new("zone123", "ops@example.com", "key");
        let batch = PurgeBatch::parse("https://a.example/\nhttps://b.example/", 25).unwrap();

        let request = CdnPurger::build_request(&settings, &batch);

        assert_eq!(request.method, Method::DELETE);
        assert_eq!(
            request.json_body,
            Some(json!({ "files": ["https://a.example/", "https://b.example/"] }))
        );
        assert!(request.tls.is_strict());
        assert!(
            request
                .headers
                .contains(&("X-Auth-Key", "key".to_string()))
        );
    }

    #[tokio::test]
    async fn test_missing_settings_skips_purge() {
        let purger = CdnPurger::new(None);
        let batch = PurgeBatch::parse("https://a.example/", 25).unwrap();

        let result = purger.purge(&batch).await;

        assert!(result.is_skipped());
        assert!(!result.has_errors());
    }
}
