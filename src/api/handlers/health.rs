//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// Edge proxy and CDN are not probed; their failures show up per purge.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "flood_store": { "status": "ok", "message": "Flood store reachable" },
///     "page_cache": { "status": "ok", "message": "Redis reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let flood_check = check_flood_store(&state).await;
    let cache_check = check_page_cache(&state).await;

    let all_healthy = flood_check.is_ok() && cache_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            flood_store: flood_check,
            page_cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_flood_store(state: &AppState) -> CheckStatus {
    if state.purge_service.flood().health_check().await {
        CheckStatus::ok("Flood store reachable")
    } else {
        CheckStatus::error("Flood store unreachable")
    }
}

async fn check_page_cache(state: &AppState) -> CheckStatus {
    let store = state.page_cache.describe();
    if state.page_cache.health_check().await {
        CheckStatus::ok(format!("{store} reachable"))
    } else {
        CheckStatus::error(format!("{store} connection failed"))
    }
}
