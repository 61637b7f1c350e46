//! # URL Purger
//!
//! Purges a list of URLs from three independent cache layers at once: the
//! application page cache, a Varnish edge proxy and the Cloudflare CDN.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Batches, per-backend results, ports and repository traits
//! - **Application Layer** ([`application`]) - Flood control, fanout and the purge workflow
//! - **Infrastructure Layer** ([`infrastructure`]) - Purgers, page cache stores, flood storage
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Purge Flow
//!
//! ```text
//! raw text ─► flood check ─► validate ─► ┬─ page cache ─┬─► report ─► listeners ─► register flood events
//!                                        ├─ Varnish     ┤
//!                                        └─ Cloudflare ─┘
//! ```
//!
//! Backends run concurrently and fail independently. Their failures are
//! reported per URL, never raised.
//!
//! ## Quick Start
//!
//! ```bash
//! export ADMIN_TOKEN="change-me"
//! export PURGE_DOMAIN="www.example.com"
//! export VARNISH_IP="10.0.0.5"
//!
//! cargo run
//!
//! curl -H "Authorization: Bearer change-me" \
//!      -d '{"urls":"https://www.example.com/"}' \
//!      -H 'Content-Type: application/json' \
//!      http://localhost:3000/api/purge
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        FanoutPurger, FloodGuard, PurgeError, PurgeService, PurgeSettings,
    };
    pub use crate::domain::entities::{Backend, BackendResult, PurgeBatch, PurgeReport};
    pub use crate::domain::ports::{Clock, PurgeListener, Purger};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
