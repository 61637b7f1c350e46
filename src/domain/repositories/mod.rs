//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contracts; implementations live in
//! `crate::infrastructure::flood`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`FloodRepository`] - Flood-control event log

pub mod flood_repository;

pub use flood_repository::{FloodRepository, FloodStoreError};

#[cfg(test)]
pub use flood_repository::MockFloodRepository;
