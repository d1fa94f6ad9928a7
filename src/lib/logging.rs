//! Logging utilities for formatted output.
//!
//! This module provides consistent, user-friendly logging for validation passes:
//! number formatting, operation timing and the end-of-run summary.

use std::time::{Duration, Instant};

use fgsheet_metrics::format_count;

use crate::orchestrator::ValidationReport;
use crate::results::Severity;

/// Formats a percentage with specified decimal places.
///
/// # Arguments
///
/// * `value` - The fraction (0.0-1.0) to format as percentage
/// * `decimals` - Number of decimal places to include
///
/// # Examples
///
/// ```
/// use fgsheet_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(0.5, 1), "50.0%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0, decimals = decimals)
}

/// Formats a duration in human-readable form.
///
/// # Examples
///
/// ```
/// use fgsheet_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
/// assert_eq!(format_duration(Duration::from_secs(45)), "45s");
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1h 30m");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs == 0 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        if remaining_secs == 0 { format!("{mins}m") } else { format!("{mins}m {remaining_secs}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Logs the outcome of a validation pass: counts by severity, every warning and error,
/// and the overall verdict.
pub fn log_validation_summary(report: &ValidationReport) {
    log::info!("Validation Summary:");
    for severity in [Severity::Info, Severity::Warning, Severity::Error] {
        log::info!("  {severity}: {}", format_count(report.count(severity) as u64));
    }
    for result in report.results.iter().filter(|r| r.severity > Severity::Info) {
        match result.severity {
            Severity::Error => log::error!("  {}: {}", result.name, result.message),
            _ => log::warn!("  {}: {}", result.name, result.message),
        }
    }

    let lanes = report.distance_matrices.len();
    if lanes > 0 {
        log::info!("  Index distance matrices computed for {} lane(s)", format_count(lanes as u64));
    }
    let lowest_green = report
        .color_balance
        .iter()
        .flat_map(|s| &s.positions)
        .filter(|p| p.total_weight > 0.0)
        .map(|p| p.green)
        .min_by(f64::total_cmp);
    if let Some(green) = lowest_green {
        log::info!("  Lowest green-channel fraction: {}", format_percent(green, 1));
    }
    log::info!("  Overall: {}", if report.passed { "PASS" } else { "FAIL" });
}

/// Operation timing and summary helper.
///
/// # Examples
///
/// ```no_run
/// use fgsheet_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Validating sample sheet");
///
/// // ... do work ...
///
/// timer.log_completion(96); // Log with sample count
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs the completion with the number of samples processed.
    pub fn log_completion(&self, samples: u64) {
        log::info!(
            "{} completed: {} samples in {}",
            self.operation,
            format_count(samples),
            format_duration(self.start_time.elapsed())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ValidationResult;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.9543, 2), "95.43%");
        assert_eq!(format_percent(0.0, 2), "0.00%");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0ms");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h");
    }

    #[test]
    fn test_operation_timer() {
        let timer = OperationTimer::new("Test");
        timer.log_completion(1000);
    }

    #[test]
    fn test_log_validation_summary() {
        log_validation_summary(&ValidationReport::from_results(Vec::new()));

        let report = ValidationReport::from_results(vec![
            ValidationResult::info("a", "ok"),
            ValidationResult::warning("b", "hmm"),
            ValidationResult::error("c", "bad"),
        ]);
        log_validation_summary(&report);
    }
}
