//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{purge_handler, purge_status_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST /purge`          - Purge URLs from every enabled backend
/// - `GET  /purge/status`   - Flood budget usage
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/purge", post(purge_handler))
        .route("/purge/status", get(purge_status_handler))
}
