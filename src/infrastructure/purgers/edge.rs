//! Purger for the Varnish edge proxy.

use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::http::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, PURGE_METHOD, PurgeRequest, TlsVerification,
    send_purge_request,
};
use crate::domain::entities::{Backend, BackendResult, PurgeBatch};
use crate::domain::ports::Purger;

/// Header carrying the hosting environment the purge is meant for.
pub const ENVIRONMENT_HEADER: &str = "X-Acquia-Purge";

/// Connection parameters for the edge proxy.
#[derive(Debug, Clone)]
pub struct EdgeSettings {
    /// Public domain whose requests are pinned to the proxy.
    pub domain: Option<String>,
    /// Address of the proxy. DNS is used when unset.
    pub ip: Option<IpAddr>,
    /// Port of the pinned `domain:port` pair.
    pub port: u16,
    /// Value of the [`ENVIRONMENT_HEADER`] header.
    pub environment: String,
    pub tls: TlsVerification,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for EdgeSettings {
    fn default() -> Self {
        Self {
            domain: None,
            ip: None,
            port: 80,
            environment: String::new(),
            tls: TlsVerification::STRICT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Sends one `PURGE` request per URL straight to the edge proxy.
///
/// A URL is processed iff its request completes with HTTP 200. Failures are
/// per URL and never stop the remaining URLs from being sent. Without both a
/// pinned domain and a proxy address nothing is sent and the backend reports
/// itself skipped, so purges never go through public DNS.
pub struct EdgeProxyPurger {
    settings: EdgeSettings,
}

impl EdgeProxyPurger {
    pub fn new(settings: EdgeSettings) -> Self {
        Self { settings }
    }

    fn is_pinned(&self) -> bool {
        self.settings.domain.is_some() && self.settings.ip.is_some()
    }

    /// Returns the DNS override for `url`, if it targets the pinned
    /// `domain:port` pair.
    fn resolve_override(&self, url: &str) -> Option<(String, SocketAddr)> {
        let domain = self.settings.domain.as_deref()?;
        let ip = self.settings.ip?;
        let parsed = Url::parse(url).ok()?;

        let same_host = parsed.host_str()?.eq_ignore_ascii_case(domain);
        let same_port = parsed.port_or_known_default()? == self.settings.port;

        (same_host && same_port).then(|| (domain.to_string(), SocketAddr::new(ip, self.settings.port)))
    }

    fn build_request(&self, url: &str) -> PurgeRequest {
        let mut request = PurgeRequest::new(PURGE_METHOD.clone(), url)
            .header("Accept-Encoding", "gzip")
            .header(ENVIRONMENT_HEADER, self.settings.environment.clone())
            .timeouts(self.settings.connect_timeout, self.settings.timeout)
            .tls(self.settings.tls);

        if let Some((domain, addr)) = self.resolve_override(url) {
            request = request.resolve(domain, addr);
        }

        request
    }
}

#[async_trait]
impl Purger for EdgeProxyPurger {
    fn backend(&self) -> Backend {
        Backend::Varnish
    }

    async fn purge(&self, batch: &PurgeBatch) -> BackendResult {
        if !self.is_pinned() {
            warn!("Varnish purge skipped: PURGE_DOMAIN or VARNISH_IP is not configured");
            return BackendResult::skipped();
        }

        let mut result = BackendResult::default();

        for url in batch {
            let request = self.build_request(url);
            match send_purge_request(&request).await {
                Ok(()) => result.record(url, true),
                Err(e) => {
                    debug!(url = %url, error = %e, "Varnish purge call failed");
                    result.record(url, false);
                }
            }
        }

        result
    }
}
