//! Flattens a [`ValidationReport`] into metric rows for TSV output.

use std::path::Path;

use anyhow::Result;
use fgsheet_metrics::{ColorBalanceMetric, IndexDistanceMetric, round_fraction, write_metrics_auto};

use crate::orchestrator::ValidationReport;

/// One row per unordered sample pair, per matrix, per lane.
#[must_use]
pub fn index_distance_metrics(report: &ValidationReport) -> Vec<IndexDistanceMetric> {
    let mut rows = Vec::new();
    for (&lane, matrices) in &report.distance_matrices {
        for (kind, matrix) in matrices {
            let ids = matrix.sample_ids();
            rows.extend(matrix.pairs().map(|(i, j, mismatches)| IndexDistanceMetric {
                lane,
                kind: kind.key().to_string(),
                sample_a: ids[i].clone(),
                sample_b: ids[j].clone(),
                mismatches,
            }));
        }
    }
    rows
}

/// One row per index cycle, per index read, per lane.
#[must_use]
pub fn color_balance_metrics(report: &ValidationReport, min_green: f64) -> Vec<ColorBalanceMetric> {
    report
        .color_balance
        .iter()
        .flat_map(|summary| {
            summary.positions.iter().map(move |p| ColorBalanceMetric {
                lane: summary.lane,
                read: summary.read.to_string(),
                position: p.position,
                total_weight: p.total_weight,
                frac_a: round_fraction(p.bases[0]),
                frac_c: round_fraction(p.bases[1]),
                frac_g: round_fraction(p.bases[2]),
                frac_t: round_fraction(p.bases[3]),
                blue: round_fraction(p.blue),
                green: round_fraction(p.green),
                dark: round_fraction(p.dark),
                low_green: p.is_low_green(min_green),
            })
        })
        .collect()
}

/// Writes the index distance table.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_index_distances<P: AsRef<Path>>(path: P, report: &ValidationReport) -> Result<()> {
    write_metrics_auto(path, &index_distance_metrics(report))
}

/// Writes the color balance table.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_color_balance<P: AsRef<Path>>(
    path: P,
    report: &ValidationReport,
    min_green: f64,
) -> Result<()> {
    write_metrics_auto(path, &color_balance_metrics(report, min_green))
}
