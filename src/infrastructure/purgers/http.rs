//! Shared primitive for outbound purge calls.
//!
//! Both the edge proxy and the CDN purgers describe their call as a
//! [`PurgeRequest`] and hand it to [`send_purge_request`]. They differ only
//! in cardinality: one request per URL versus one request per batch.

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::LazyLock;
use std::time::Duration;

/// Non-standard method understood by Varnish purge ACLs.
pub static PURGE_METHOD: LazyLock<Method> =
    LazyLock::new(|| Method::from_bytes(b"PURGE").unwrap());

/// Time allowed to establish the TCP/TLS connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Time allowed for the whole request, connection included.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Why a purge call did not count as processed.
#[derive(Debug, thiserror::Error)]
pub enum PurgeCallError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Http(StatusCode),
}

/// TLS verification switches.
///
/// Both default to on. Turning either off accepts forged certificates and
/// must be an explicit operator decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlsVerification {
    pub verify_peer: bool,
    pub verify_host: bool,
}

impl TlsVerification {
    pub const STRICT: TlsVerification = TlsVerification {
        verify_peer: true,
        verify_host: true,
    };

    pub fn is_strict(&self) -> bool {
        self.verify_peer && self.verify_host
    }
}

impl Default for TlsVerification {
    fn default() -> Self {
        Self::STRICT
    }
}

/// Description of a single outbound purge call.
#[derive(Debug, Clone)]
pub struct PurgeRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub json_body: Option<Value>,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub tls: TlsVerification,
    /// Pins `domain` to an address instead of resolving it through DNS.
    pub resolve: Option<(String, SocketAddr)>,
}

impl PurgeRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            json_body: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            tls: TlsVerification::STRICT,
            resolve: None,
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.json_body = Some(body);
        self
    }

    pub fn timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }

    pub fn tls(mut self, tls: TlsVerification) -> Self {
        self.tls = tls;
        self
    }

    pub fn resolve(mut self, domain: impl Into<String>, addr: SocketAddr) -> Self {
        self.resolve = Some((domain.into(), addr));
        self
    }

    fn build_client(&self) -> Result<Client, PurgeCallError> {
        let mut builder = Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .user_agent(format!("url-purger/{}", env!("CARGO_PKG_VERSION")));

        if !self.tls.verify_peer {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if !self.tls.verify_host {
            builder = builder.danger_accept_invalid_hostnames(true);
        }
        if let Some((domain, addr)) = &self.resolve {
            builder = builder.resolve(domain, *addr);
        }

        builder.build().map_err(PurgeCallError::Client)
    }
}

/// Sends a purge call and succeeds only on HTTP 200.
///
/// No retries are attempted. A timed-out call is reported like any other
/// transport error.
///
/// # Errors
///
/// - [`PurgeCallError::Client`] if the HTTP client cannot be configured
/// - [`PurgeCallError::Transport`] on connection errors and timeouts
/// - [`PurgeCallError::Http`] on any status other than 200
pub async fn send_purge_request(request: &PurgeRequest) -> Result<(), PurgeCallError> {
    let client = request.build_client()?;

    let mut builder = client.request(request.method.clone(), &request.url);
    for (name, value) in &request.headers {
        builder = builder.header(*name, value);
    }
    if let Some(body) = &request.json_body {
        builder = builder.json(body);
    }

    let response = builder.send().await.map_err(PurgeCallError::Transport)?;

    match response.status() {
        StatusCode::OK => Ok(()),
        status => Err(PurgeCallError::Http(status)),
    }
}
