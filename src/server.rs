//! HTTP server initialization and runtime setup.
//!
//! Builds the flood store, the page cache and the backend purgers from
//! [`Config`], then serves the Axum router until Ctrl+C.

use crate::application::services::{AuthService, FanoutPurger, FloodGuard, PurgeService};
use crate::config::Config;
use crate::domain::ports::{Purger, PurgeListener};
use crate::domain::repositories::FloodRepository;
use crate::infrastructure::cache::{NullCache, PageCache, RedisPageCache};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::flood::{MemoryFloodRepository, PgFloodRepository};
use crate::infrastructure::listeners::TracingPurgeListener;
use crate::infrastructure::purgers::{CdnPurger, EdgeProxyPurger, LocalCachePurger};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Connects the page cache store.
///
/// Falls back to [`NullCache`] when Redis is not configured or unreachable.
pub async fn connect_page_cache(config: &Config) -> Arc<dyn PageCache> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Page cache store not configured (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisPageCache::connect(redis_url, &config.page_cache_prefix).await {
        Ok(redis) => {
            tracing::info!("Page cache store enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Connects the flood event log and applies migrations.
///
/// Without a database the log lives in memory and only limits this process.
///
/// # Errors
///
/// Returns an error if the database is configured but unreachable, or if
/// migrations fail.
pub async fn connect_flood_store(config: &Config) -> Result<Arc<dyn FloodRepository>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, flood events are kept in memory");
        return Ok(Arc::new(MemoryFloodRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    Ok(Arc::new(PgFloodRepository::new(Arc::new(pool))))
}

/// Registers one purger per enabled backend.
pub fn build_purgers(config: &Config, page_cache: Arc<dyn PageCache>) -> Vec<Arc<dyn Purger>> {
    let mut purgers: Vec<Arc<dyn Purger>> = Vec::with_capacity(3);

    if config.page_cache_enabled {
        purgers.push(Arc::new(LocalCachePurger::new(page_cache)));
    }
    if config.varnish_enabled {
        purgers.push(Arc::new(EdgeProxyPurger::new(config.edge_settings())));
    }
    if config.cloudflare_enabled {
        purgers.push(Arc::new(CdnPurger::new(config.cdn_settings())));
    }

    purgers
}

/// Wires the purge workflow with the system clock and the default listener.
pub fn build_purge_service(
    config: &Config,
    page_cache: Arc<dyn PageCache>,
    flood_store: Arc<dyn FloodRepository>,
) -> PurgeService {
    let listeners: Vec<Arc<dyn PurgeListener>> = vec![Arc::new(TracingPurgeListener)];

    PurgeService::new(
        FanoutPurger::new(build_purgers(config, page_cache)),
        FloodGuard::new(flood_store, Arc::new(SystemClock::new())),
        listeners,
        config.purge_settings(),
    )
}

/// Builds the full application state from configuration.
///
/// # Errors
///
/// Returns an error if the flood store cannot be initialised.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let page_cache = connect_page_cache(config).await;
    let flood_store = connect_flood_store(config).await?;
    let purge_service = build_purge_service(config, page_cache.clone(), flood_store);

    Ok(AppState::new(
        Arc::new(purge_service),
        Arc::new(AuthService::new(&config.admin_token)),
        page_cache,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
