mod common;

use axum::http::StatusCode;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use url_purger::application::services::FanoutPurger;
use url_purger::domain::entities::{Backend, PurgeBatch};
use url_purger::domain::ports::Purger;
use url_purger::infrastructure::cache::MemoryPageCache;
use url_purger::infrastructure::purgers::edge::ENVIRONMENT_HEADER;
use url_purger::infrastructure::purgers::{
    CdnPurger, CdnSettings, EdgeProxyPurger, EdgeSettings, LocalCachePurger,
};
use url_purger::server::build_purgers;

#[tokio::test]
async fn test_edge_purge_accounts_each_url() {
    let varnish = common::spawn_varnish(&["/broken"]).await;
    let config = common::test_config(&varnish, None);
    let purger = EdgeProxyPurger::new(config.edge_settings());

    let urls = [
        varnish.pinned_url("/"),
        varnish.pinned_url("/broken"),
        varnish.pinned_url("/news"),
    ];
    let batch = PurgeBatch::parse(&urls.join("\n"), 25).unwrap();

    let result = purger.purge(&batch).await;

    assert_eq!(result.processed, vec![urls[0].clone(), urls[2].clone()]);
    assert_eq!(result.errors, vec![urls[1].clone()]);

    let processed: HashSet<_> = result.processed.iter().collect();
    let errors: HashSet<_> = result.errors.iter().collect();
    assert!(processed.is_disjoint(&errors));
    assert_eq!(processed.len() + errors.len(), 3);
}

#[tokio::test]
async fn test_edge_purge_sends_environment_header_to_pinned_address() {
    let varnish = common::spawn_varnish(&[]).await;
    let config = common::test_config(&varnish, None);
    let purger = EdgeProxyPurger::new(config.edge_settings());
    let batch = PurgeBatch::parse(&varnish.pinned_url("/page"), 25).unwrap();

    let result = purger.purge(&batch).await;
    assert!(!result.has_errors());

    let requests = varnish.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PURGE");
    assert_eq!(requests[0].path, "/page");
    assert_eq!(requests[0].headers[ENVIRONMENT_HEADER], "test");
    assert_eq!(
        requests[0].headers["host"],
        format!("{}:{}", common::PINNED_DOMAIN, varnish.port())
    );
}

#[tokio::test]
async fn test_unreachable_edge_marks_every_url_failed() {
    let varnish = common::spawn_varnish(&[]).await;
    let mut config = common::test_config(&varnish, None);
    config.varnish_ip = Some("127.0.0.1".parse().unwrap());
    config.varnish_port = 9;

    let purger = EdgeProxyPurger::new(config.edge_settings());
    let batch = PurgeBatch::parse("http://127.0.0.1:9/a\nhttp://127.0.0.1:9/b", 25).unwrap();

    let result = purger.purge(&batch).await;

    assert!(result.processed.is_empty());
    assert_eq!(result.errors.len(), 2);
}

#[tokio::test]
async fn test_cdn_purge_is_all_or_nothing() {
    let varnish = common::spawn_varnish(&[]).await;
    let batch = PurgeBatch::parse("https://a.example/\nhttps://b.example/", 25).unwrap();

    let ok = common::spawn_cloudflare(StatusCode::OK).await;
    let config = common::test_config(&varnish, Some(&ok));
    let result = CdnPurger::new(config.cdn_settings()).purge(&batch).await;
    assert_eq!(result.processed, batch.urls());
    assert!(result.errors.is_empty());

    let failing = common::spawn_cloudflare(StatusCode::BAD_REQUEST).await;
    let config = common::test_config(&varnish, Some(&failing));
    let result = CdnPurger::new(config.cdn_settings()).purge(&batch).await;
    assert!(result.processed.is_empty());
    assert_eq!(result.errors, batch.urls());
}

#[tokio::test]
async fn test_timed_out_edge_call_is_an_error() {
    let varnish = common::spawn_hanging_varnish().await;
    let config = common::test_config(&varnish, None);
    let purger = EdgeProxyPurger::new(EdgeSettings {
        connect_timeout: Duration::from_millis(200),
        timeout: Duration::from_millis(300),
        ..config.edge_settings()
    });
    let batch = PurgeBatch::parse(&varnish.pinned_url("/slow"), 25).unwrap();

    let result = purger.purge(&batch).await;

    assert!(result.processed.is_empty());
    assert_eq!(result.errors, batch.urls());
    assert_eq!(varnish.requests().len(), 1);
}

#[tokio::test]
async fn test_unpinned_edge_sends_nothing() {
    let varnish = common::spawn_varnish(&[]).await;
    let mut config = common::test_config(&varnish, None);
    config.varnish_ip = None;
    let fanout = FanoutPurger::new(build_purgers(&config, Arc::new(MemoryPageCache::new())));
    let batch = PurgeBatch::parse(&varnish.pinned_url("/"), 25).unwrap();

    let report = fanout.purge_all(&batch).await;

    assert!(report.get(Backend::Varnish).unwrap().is_skipped());
    assert!(varnish.requests().is_empty());
}

#[tokio::test]
async fn test_unreachable_cdn_fails_whole_batch() {
    let settings = CdnSettings::new(common::ZONE_ID, "ops@purge.test", "cf-key")
        .with_api_url("http://127.0.0.1:9/client/v4");
    let batch = PurgeBatch::parse("https://a.example/\nhttps://b.example/", 25).unwrap();

    let result = CdnPurger::new(Some(settings)).purge(&batch).await;

    assert!(result.processed.is_empty());
    assert_eq!(result.errors, batch.urls());
}

#[tokio::test]
async fn test_cdn_purge_sends_one_bulk_request() {
    let varnish = common::spawn_varnish(&[]).await;
    let cloudflare = common::spawn_cloudflare(StatusCode::OK).await;
    let config = common::test_config(&varnish, Some(&cloudflare));
    let batch = PurgeBatch::parse("https://a.example/\nhttps://b.example/", 25).unwrap();

    CdnPurger::new(config.cdn_settings()).purge(&batch).await;

    let requests = cloudflare.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers["x-auth-email"], "ops@purge.test");
    assert_eq!(requests[0].headers["x-auth-key"], "cf-key");

    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "files": ["https://a.example/", "https://b.example/"] })
    );
}

#[tokio::test]
async fn test_local_purge_of_missing_key_is_processed() {
    let cache = Arc::new(MemoryPageCache::new());
    cache.insert("https://a.example/:html", "<html>");
    let purger = LocalCachePurger::new(cache.clone());
    let batch = PurgeBatch::parse("https://a.example/\nhttps://missing.example/", 25).unwrap();

    let result = purger.purge(&batch).await;

    assert_eq!(result.processed, batch.urls());
    assert!(result.errors.is_empty());
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_all_backends_succeeding() {
    let varnish = common::spawn_varnish(&[]).await;
    let cloudflare = common::spawn_cloudflare(StatusCode::OK).await;
    let config = common::test_config(&varnish, Some(&cloudflare));
    let fanout = FanoutPurger::new(build_purgers(&config, Arc::new(MemoryPageCache::new())));

    let raw = format!(
        "{}\n{}",
        varnish.pinned_url("/a"),
        varnish.pinned_url("/b")
    );
    let batch = PurgeBatch::parse(&raw, 25).unwrap();
    assert_eq!(batch.len(), 2);

    let report = fanout.purge_all(&batch).await;

    for backend in Backend::ALL {
        let result = report.get(backend).unwrap();
        assert!(result.errors.is_empty(), "{backend} reported errors");
        assert_eq!(result.processed, batch.urls());
    }
}

#[tokio::test]
async fn test_missing_cdn_config_skips_without_blocking_others() {
    let varnish = common::spawn_varnish(&[]).await;
    let config = common::test_config(&varnish, None);
    let fanout = FanoutPurger::new(build_purgers(&config, Arc::new(MemoryPageCache::new())));
    let batch = PurgeBatch::parse(&varnish.pinned_url("/"), 25).unwrap();

    let report = fanout.purge_all(&batch).await;

    assert!(report.get(Backend::Cloudflare).unwrap().is_skipped());
    assert_eq!(report.get(Backend::Varnish).unwrap().processed.len(), 1);
    assert_eq!(report.get(Backend::PageCache).unwrap().processed.len(), 1);
    assert!(!report.has_errors());
}

#[tokio::test]
async fn test_repeated_purge_yields_same_shape() {
    let varnish = common::spawn_varnish(&["/broken"]).await;
    let config = common::test_config(&varnish, None);
    let fanout = FanoutPurger::new(build_purgers(&config, Arc::new(MemoryPageCache::new())));
    let raw = format!(
        "{}\n{}",
        varnish.pinned_url("/ok"),
        varnish.pinned_url("/broken")
    );
    let batch = PurgeBatch::parse(&raw, 25).unwrap();

    let first = fanout.purge_all(&batch).await;
    let second = fanout.purge_all(&batch).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_disabled_backends_are_not_registered() {
    let varnish = common::spawn_varnish(&[]).await;
    let mut config = common::test_config(&varnish, None);
    config.varnish_enabled = false;
    config.cloudflare_enabled = false;

    let purgers = build_purgers(&config, Arc::new(MemoryPageCache::new()));

    assert_eq!(
        FanoutPurger::new(purgers).backends(),
        vec![Backend::PageCache]
    );
}
