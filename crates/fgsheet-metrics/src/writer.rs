//! Utilities for writing metric tables.

use anyhow::{Context, Result};
use fgoxide::io::DelimFile;
use serde::Serialize;
use std::path::Path;

use crate::Metric;

/// Write metric rows to a TSV file with consistent error handling.
///
/// # Errors
/// Returns an error if the file cannot be created or written to
///
/// # Example
/// ```no_run
/// use fgsheet_metrics::writer::write_metrics;
/// use fgsheet_metrics::IndexDistanceMetric;
///
/// let rows = vec![IndexDistanceMetric {
///     lane: 1,
///     kind: "i7".to_string(),
///     sample_a: "S1".to_string(),
///     sample_b: "S2".to_string(),
///     mismatches: 3,
/// }];
/// write_metrics("distances.tsv", &rows, "index distance").unwrap();
/// ```
pub fn write_metrics<P: AsRef<Path>, T: Serialize>(
    path: P,
    metrics: &[T],
    description: &str,
) -> Result<()> {
    let path_ref = path.as_ref();
    DelimFile::default()
        .write_tsv(&path_ref, metrics)
        .with_context(|| format!("Failed to write {} metrics: {}", description, path_ref.display()))
}

/// Write rows implementing [`Metric`], naming them by the metric's own name in errors.
///
/// # Errors
/// Returns an error if the file cannot be created or written to
pub fn write_metrics_auto<P: AsRef<Path>, T: Metric>(path: P, metrics: &[T]) -> Result<()> {
    write_metrics(path, metrics, T::metric_name())
}
