//! Helper utilities for integration tests.

pub mod assertions;
pub mod sheet_files;

pub use assertions::*;
pub use sheet_files::*;
