//! Custom assertion helpers for integration tests.
//!
//! These helpers provide reusable assertions over validation reports.

#![allow(dead_code)]

use fgsheet_lib::{Severity, ValidationReport};

/// Asserts that a result named `name` with `severity` exists and its message contains
/// every string in `fragments`.
///
/// # Panics
///
/// Panics if no such result exists.
pub fn assert_result(report: &ValidationReport, name: &str, severity: Severity, fragments: &[&str]) {
    let found = report.results.iter().any(|r| {
        r.name == name
            && r.severity == severity
            && fragments.iter().all(|fragment| r.message.contains(fragment))
    });
    assert!(
        found,
        "expected a {severity} result named {name} mentioning {fragments:?}, got:\n{}",
        report.results.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    );
}

/// Asserts that no result is an ERROR.
///
/// # Panics
///
/// Panics listing every ERROR otherwise.
pub fn assert_no_errors(report: &ValidationReport) {
    let errors: Vec<String> =
        report.results.iter().filter(|r| r.is_error()).map(ToString::to_string).collect();
    assert!(errors.is_empty(), "unexpected errors:\n{}", errors.join("\n"));
    assert!(report.passed);
}
