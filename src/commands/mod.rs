//! CLI command implementations for fgsheet.
//!
//! - [`validate`] - Validate a sample sheet against a run configuration
//! - [`override_cycles`] - Resolve a single override-cycles pattern

#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod common;
pub mod override_cycles;
pub mod validate;
