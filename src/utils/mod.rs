//! Utility functions shared by the service and the CLI.
//!
//! - [`url_validator`] - Raw submission parsing and URL validation
//! - [`interval`] - Human-readable interval formatting

pub mod interval;
pub mod url_validator;
