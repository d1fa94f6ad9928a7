//! Custom error types for fgsheet operations.

use std::any::Any;

use thiserror::Error;

/// Result type alias for fgsheet operations
pub type Result<T> = std::result::Result<T, FgsheetError>;

/// Error type for fgsheet operations
#[derive(Error, Debug)]
pub enum FgsheetError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "sample sheet", "run configuration")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// An override cycles pattern, or one of its segments, could not be parsed or resolved
    #[error("Invalid override cycles segment '{segment}': {reason}")]
    InvalidOverrideCycles {
        /// The offending segment (or the whole pattern if it could not be split)
        segment: String,
        /// Explanation of the problem
        reason: String,
    },

    /// The run configuration is missing or internally inconsistent
    #[error("Invalid run configuration: {reason}")]
    InvalidRunConfiguration {
        /// Explanation of the problem
        reason: String,
    },
}

/// Renders a panic payload caught by `catch_unwind` as a message.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
