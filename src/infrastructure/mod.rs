//! Infrastructure layer for external integrations.
//!
//! Concrete adapters for the interfaces the domain layer declares.
//!
//! # Modules
//!
//! - [`cache`] - Page cache stores (Redis, in-memory and no-op)
//! - [`clock`] - System and manually driven clocks
//! - [`flood`] - Flood event log (PostgreSQL and in-memory)
//! - [`listeners`] - Built-in manual purge listeners
//! - [`purgers`] - Page cache, Varnish and Cloudflare purgers

pub mod cache;
pub mod clock;
pub mod flood;
pub mod listeners;
pub mod purgers;
