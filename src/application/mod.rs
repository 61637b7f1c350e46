//! Application layer services implementing the purge workflow.
//!
//! Services consume domain ports and repository traits and give the HTTP
//! handlers and the admin CLI one entry point per use case.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Admin bearer token check
//! - [`services::fanout::FanoutPurger`] - Concurrent dispatch to every backend
//! - [`services::flood_service::FloodGuard`] - Sliding-window flood control
//! - [`services::purge_service::PurgeService`] - Validation, flood checks and fanout

pub mod services;
