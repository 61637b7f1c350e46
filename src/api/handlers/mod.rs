//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod purge;

pub use health::health_handler;
pub use purge::{purge_handler, purge_status_handler};
