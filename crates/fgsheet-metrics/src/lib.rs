#![deny(unsafe_code)]

//! Metric row types and TSV writer for fgsheet.
//!
//! This crate provides:
//! - the [`Metric`] trait implemented by every row type written to disk
//! - [`distance`] rows describing pairwise index mismatches within a lane
//! - [`balance`] rows describing per-cycle color balance within a lane
//! - [`writer`] helpers for TSV output

pub mod balance;
pub mod distance;
pub mod writer;

use serde::{Deserialize, Serialize};

/// Number of decimal places used when fractions are presented.
pub const FRACTION_PRECISION: i32 = 2;

/// A metric type that can be serialized to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone {
    /// Human-readable name for this metric type, used in error messages.
    fn metric_name() -> &'static str;
}

/// Rounds a fraction to [`FRACTION_PRECISION`] decimal places.
///
/// # Example
/// ```
/// use fgsheet_metrics::round_fraction;
/// assert!((round_fraction(0.12345) - 0.12).abs() < f64::EPSILON);
/// assert!((round_fraction(0.666) - 0.67).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn round_fraction(value: f64) -> f64 {
    let scale = 10_f64.powi(FRACTION_PRECISION);
    (value * scale).round() / scale
}

/// Formats a count with thousands separators.
///
/// # Example
/// ```
/// use fgsheet_metrics::format_count;
/// assert_eq!(format_count(1234567), "1,234,567");
/// assert_eq!(format_count(12), "12");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub use balance::ColorBalanceMetric;
pub use distance::IndexDistanceMetric;
pub use writer::{write_metrics, write_metrics_auto};
