mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use axum_test::TestServer;
use std::sync::Arc;
use url_purger::api::handlers::health_handler;
use url_purger::infrastructure::cache::{
    CacheError, CacheResult, MemoryPageCache, NullCache, PageCache,
};

/// Page cache whose store never answers.
struct DownCache;

#[async_trait]
impl PageCache for DownCache {
    async fn delete(&self, key: &str) -> CacheResult<()> {
        Err(CacheError::OperationError(format!("DEL {key}: connection refused")))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn describe(&self) -> &'static str {
        "Redis"
    }
}

async fn health_server(page_cache: Arc<dyn PageCache>) -> TestServer {
    let varnish = common::spawn_varnish(&[]).await;
    let config = common::test_config(&varnish, None);
    let state = common::create_test_state(&config, page_cache);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = health_server(Arc::new(MemoryPageCache::new())).await;

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["flood_store"]["status"], "ok");
    assert_eq!(json["checks"]["page_cache"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = health_server(Arc::new(NullCache::new())).await;

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("flood_store").is_some());
    assert!(json["checks"].get("page_cache").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_page_cache_down() {
    let server = health_server(Arc::new(DownCache)).await;

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["flood_store"]["status"], "ok");
    assert_eq!(json["checks"]["page_cache"]["status"], "error");
    assert_eq!(
        json["checks"]["page_cache"]["message"],
        "Redis connection failed"
    );
}
