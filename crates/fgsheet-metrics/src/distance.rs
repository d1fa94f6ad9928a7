//! Pairwise index distance rows.

use serde::{Deserialize, Serialize};

use crate::Metric;

/// Mismatch count between the indexes of two samples sequenced on the same lane.
///
/// One row is written per unordered sample pair; self comparisons are never written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDistanceMetric {
    /// The lane both samples are assigned to
    pub lane: u32,
    /// Which index read(s) were compared: `i7_i5`, `i7` or `i5`
    pub kind: String,
    /// Sample_ID of the first sample
    pub sample_a: String,
    /// Sample_ID of the second sample
    pub sample_b: String,
    /// Number of mismatching positions, ignoring no-calls
    pub mismatches: u32,
}

impl Metric for IndexDistanceMetric {
    fn metric_name() -> &'static str {
        "index distance"
    }
}
