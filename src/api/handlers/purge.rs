//! Handlers for the purge endpoints.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::purge::{PurgeResponse, PurgeUrlsRequest};
use crate::application::services::{FLOOD_EVENT, FloodStatus};
use crate::error::AppError;
use crate::state::AppState;

/// Purges a list of URLs from every enabled cache backend.
///
/// # Endpoint
///
/// `POST /api/purge`
///
/// # Request Body
///
/// ```json
/// { "urls": "https://www.example.com/\nhttps://www.example.com/news" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "summary": { "backends": 3, "failed": 1, "success": false },
///   "backends": {
///     "page_cache": { "processed": ["https://www.example.com/", "https://www.example.com/news"], "errors": [] },
///     "varnish":    { "processed": ["https://www.example.com/"], "errors": ["https://www.example.com/news"] },
///     "cloudflare": { "processed": ["https://www.example.com/", "https://www.example.com/news"], "errors": [] }
///   },
///   "notices": [
///     { "backend": "page_cache", "level": "status", "message": "Page cache was purged successfully - processed 2 url(s)" }
///   ]
/// }
/// ```
///
/// Backend failures never fail the request; they are listed per backend.
///
/// # Errors
///
/// - 400 if the submission is empty, too large or contains an invalid URL
/// - 429 if the flood limit has been reached
/// - 500 if the flood store is unavailable
pub async fn purge_handler(
    State(state): State<AppState>,
    Json(payload): Json<PurgeUrlsRequest>,
) -> Result<Json<PurgeResponse>, AppError> {
    payload.validate()?;

    let report = state
        .purge_service
        .purge_urls(&payload.urls, FLOOD_EVENT)
        .await?;

    Ok(Json(report.into()))
}

/// Reports how much of the flood budget has been used.
///
/// # Endpoint
///
/// `GET /api/purge/status`
///
/// # Response
///
/// ```json
/// { "count": 12, "limit": 100, "interval_seconds": 86400, "interval": "1 day", "allowed": true }
/// ```
pub async fn purge_status_handler(
    State(state): State<AppState>,
) -> Result<Json<FloodStatus>, AppError> {
    let status = state.purge_service.flood_status(FLOOD_EVENT).await?;
    Ok(Json(status))
}
