//! REST surface of the purger.
//!
//! Turns JSON submissions into calls on
//! [`PurgeService`](crate::application::services::PurgeService) and renders
//! the resulting report or error.
//!
//! - [`dto`] - request and response bodies
//! - [`handlers`] - purge, flood status and health endpoints
//! - [`middleware`] - admin token check and request tracing
//! - [`routes`] - the `/api` route table

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
