#![allow(dead_code)]

use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Router;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use url_purger::application::services::AuthService;
use url_purger::config::{CloudflareConfig, Config};
use url_purger::infrastructure::cache::PageCache;
use url_purger::infrastructure::flood::MemoryFloodRepository;
use url_purger::server::build_purge_service;
use url_purger::state::AppState;

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const PINNED_DOMAIN: &str = "www.purge.test";
pub const ZONE_ID: &str = "zone123";

/// A request captured by a fake backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

/// A throwaway HTTP server standing in for Varnish or Cloudflare.
pub struct FakeBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeBackend {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// URL on the pinned domain that resolves to this server.
    pub fn pinned_url(&self, path: &str) -> String {
        format!("http://{}:{}{}", PINNED_DOMAIN, self.port(), path)
    }

    pub fn api_url(&self) -> String {
        format!("http://{}/client/v4", self.addr)
    }
}

#[derive(Clone)]
struct VarnishState {
    failing_paths: Arc<HashSet<String>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Clone)]
struct CloudflareState {
    status: StatusCode,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn record(req: Request) -> RecordedRequest {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let headers = req.headers().clone();
    let body = to_bytes(req.into_body(), usize::MAX).await.unwrap();

    RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}

async fn varnish_handler(State(state): State<VarnishState>, req: Request) -> StatusCode {
    let recorded = record(req).await;
    let status = if recorded.method != "PURGE" {
        StatusCode::METHOD_NOT_ALLOWED
    } else if state.failing_paths.contains(&recorded.path) {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    state.requests.lock().unwrap().push(recorded);
    status
}

async fn cloudflare_handler(State(state): State<CloudflareState>, req: Request) -> StatusCode {
    let recorded = record(req).await;
    let expected_path = format!("/client/v4/zones/{ZONE_ID}/purge_cache");
    let status = if recorded.method != "DELETE" || recorded.path != expected_path {
        StatusCode::NOT_FOUND
    } else {
        state.status
    };

    state.requests.lock().unwrap().push(recorded);
    status
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Starts a fake Varnish answering 200 to `PURGE` except on `failing_paths`.
pub async fn spawn_varnish(failing_paths: &[&str]) -> FakeBackend {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = VarnishState {
        failing_paths: Arc::new(failing_paths.iter().map(|p| p.to_string()).collect()),
        requests: requests.clone(),
    };

    let app = Router::new().fallback(varnish_handler).with_state(state);
    let addr = serve(app).await;

    FakeBackend { addr, requests }
}

/// Starts a fake Varnish that accepts requests and never answers them.
pub async fn spawn_hanging_varnish() -> FakeBackend {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    let app = Router::new().fallback(move |req: Request| {
        let recorded = recorded.clone();
        async move {
            let request = record(req).await;
            recorded.lock().unwrap().push(request);
            std::future::pending::<StatusCode>().await
        }
    });
    let addr = serve(app).await;

    FakeBackend { addr, requests }
}

/// Starts a fake Cloudflare API answering every purge with `status`.
pub async fn spawn_cloudflare(status: StatusCode) -> FakeBackend {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = CloudflareState {
        status,
        requests: requests.clone(),
    };

    let app = Router::new().fallback(cloudflare_handler).with_state(state);
    let addr = serve(app).await;

    FakeBackend { addr, requests }
}

/// Configuration pointing every backend at the given fakes.
pub fn test_config(varnish: &FakeBackend, cloudflare: Option<&FakeBackend>) -> Config {
    Config {
        database_url: None,
        redis_url: None,
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        admin_token: ADMIN_TOKEN.to_string(),
        max_url_per_request: 25,
        flood_limit: 100,
        flood_interval_hours: 24,
        page_cache_enabled: true,
        page_cache_prefix: String::new(),
        purge_domain: Some(PINNED_DOMAIN.to_string()),
        varnish_enabled: true,
        varnish_ip: Some("127.0.0.1".parse().unwrap()),
        varnish_port: varnish.port(),
        varnish_environment: "test".to_string(),
        varnish_verify_peer: true,
        varnish_verify_host: true,
        cloudflare_enabled: true,
        cloudflare: cloudflare.map(|cf| CloudflareConfig {
            zone_id: ZONE_ID.to_string(),
            email: "ops@purge.test".to_string(),
            api_key: "cf-key".to_string(),
            api_url: cf.api_url(),
        }),
        db_max_connections: 1,
        db_connect_timeout: 1,
    }
}

/// Application state backed by in-memory stores.
pub fn create_test_state(config: &Config, page_cache: Arc<dyn PageCache>) -> AppState {
    let service = build_purge_service(
        config,
        page_cache.clone(),
        Arc::new(MemoryFloodRepository::new()),
    );

    AppState::new(
        Arc::new(service),
        Arc::new(AuthService::new(&config.admin_token)),
        page_cache,
    )
}
