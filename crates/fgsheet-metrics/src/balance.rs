//! Per-cycle color balance rows.

use serde::{Deserialize, Serialize};

use crate::Metric;

/// Nucleotide and dye-channel fractions at one index cycle of one lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBalanceMetric {
    /// The lane
    pub lane: u32,
    /// The index read: `i7` or `i5`
    pub read: String,
    /// 1-based cycle within the index read
    pub position: usize,
    /// Proportion-weighted number of called bases at this cycle
    pub total_weight: f64,
    /// Fraction of A
    pub frac_a: f64,
    /// Fraction of C
    pub frac_c: f64,
    /// Fraction of G
    pub frac_g: f64,
    /// Fraction of T
    pub frac_t: f64,
    /// Fraction of signal in the blue channel
    pub blue: f64,
    /// Fraction of signal in the green channel
    pub green: f64,
    /// Fraction of cycles with no signal (dark)
    pub dark: f64,
    /// True if the green fraction is below the warning threshold
    pub low_green: bool,
}

impl Metric for ColorBalanceMetric {
    fn metric_name() -> &'static str {
        "color balance"
    }
}
