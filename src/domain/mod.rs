//! Domain layer containing purge entities and the interfaces around them.
//!
//! # Architecture
//!
//! - [`entities`] - Batches, per-backend results, reports and flood events
//! - [`repositories`] - Storage trait definitions
//! - [`ports`] - Backend purger, listener and clock interfaces
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Traits define contracts implemented by the infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])
//!
//! # Purge Flow
//!
//! 1. Raw text is parsed into a [`entities::PurgeBatch`]
//! 2. Every registered [`ports::Purger`] receives the batch independently
//! 3. Outcomes are collected into a [`entities::PurgeReport`]
//! 4. [`ports::PurgeListener`]s are told which URLs were purged
//! 5. One [`entities::FloodEvent`] per URL is appended via [`repositories::FloodRepository`]

pub mod entities;
pub mod ports;
pub mod repositories;
