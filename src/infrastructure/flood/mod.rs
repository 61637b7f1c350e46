//! Flood event log storage.
//!
//! - [`PgFloodRepository`] - shared log in PostgreSQL
//! - [`MemoryFloodRepository`] - per-process fallback when no database is set

mod memory_flood_repository;
mod pg_flood_repository;

pub use memory_flood_repository::MemoryFloodRepository;
pub use pg_flood_repository::PgFloodRepository;
