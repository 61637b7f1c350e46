//! Core purge entities.
//!
//! - [`PurgeBatch`] - validated list of URLs for one submission
//! - [`Backend`], [`BackendResult`], [`PurgeReport`] - fanout outcome accounting
//! - [`FloodEvent`] - a single flood-control registration

pub mod flood_event;
pub mod purge_batch;
pub mod report;

pub use flood_event::FloodEvent;
pub use purge_batch::PurgeBatch;
pub use report::{Backend, BackendResult, Notice, NoticeLevel, PurgeReport};
