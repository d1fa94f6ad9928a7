//! Input validation utilities
//!
//! This module provides validation functions for command-line parameters, file paths
//! and configuration values with consistent error messages.
//!
//! These check the *inputs to* fgsheet. Checks over the contents of a sample sheet
//! live in [`crate::consistency`].

use crate::errors::{FgsheetError, Result};
use std::fmt::Display;
use std::path::Path;

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Sample sheet")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use fgsheet_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/samples.csv", "Sample sheet");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(FgsheetError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that a fraction is in the range [0.0, 1.0]
///
/// # Errors
/// Returns an error if the value is not in [0.0, 1.0] (NaN included)
///
/// # Example
/// ```
/// use fgsheet_lib::validation::validate_fraction;
///
/// validate_fraction(0.1, "min-green-fraction").unwrap();
/// assert!(validate_fraction(1.5, "min-green-fraction").is_err());
/// ```
pub fn validate_fraction(value: f64, name: &str) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(FgsheetError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be between 0 and 1, got: {value}"),
        });
    }
    Ok(())
}

/// Validate that a value is positive (> 0)
///
/// # Errors
/// Returns an error if the value is not positive
///
/// # Example
/// ```
/// use fgsheet_lib::validation::validate_positive;
///
/// validate_positive(151, "read1 cycles").unwrap();
/// assert!(validate_positive(0, "read1 cycles").is_err());
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn validate_positive<T: Ord + Display + Default>(value: T, name: &str) -> Result<()> {
    if value <= T::default() {
        return Err(FgsheetError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be positive (> 0), got: {value}"),
        });
    }
    Ok(())
}

/// Validate that a value does not exceed `max`
///
/// # Errors
/// Returns an error if `value > max`
///
/// # Example
/// ```
/// use fgsheet_lib::validation::validate_at_most;
///
/// validate_at_most(10, 24, "fixed-index-length").unwrap();
/// assert!(validate_at_most(25, 24, "fixed-index-length").is_err());
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn validate_at_most<T: Ord + Display>(value: T, max: T, name: &str) -> Result<()> {
    if value > max {
        return Err(FgsheetError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be at most {max}, got: {value}"),
        });
    }
    Ok(())
}
