//! Dye-channel balance of the index cycles of each lane.
//!
//! For every position of the padded i7 (and i5, as the instrument reads it) the
//! proportion-weighted base counts of the samples on a lane are mapped to the blue,
//! green and dark channels of the run's chemistry. A cycle with too little green signal
//! risks miscalls and is reported as a warning.

use std::fmt;

use fgsheet_dna::CANONICAL_BASES;
use serde::{Deserialize, Serialize};

use crate::padding::{PaddedIndexTable, PaddingLength};
use crate::results::{ValidationResult, enumerate_capped};
use crate::run_config::{ColorChemistry, ReadSegment, RunConfiguration};
use crate::sample::SampleTable;

/// Name of the results produced for low green-channel cycles.
pub const COLOR_BALANCE: &str = "color_balance";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexRead {
    I7,
    I5,
}

impl IndexRead {
    #[must_use]
    pub fn segment(self) -> ReadSegment {
        match self {
            IndexRead::I7 => ReadSegment::Index1,
            IndexRead::I5 => ReadSegment::Index2,
        }
    }
}

impl fmt::Display for IndexRead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexRead::I7 => "i7",
            IndexRead::I5 => "i5",
        })
    }
}

/// Base and channel fractions at one index position.
///
/// Fractions are of the total proportion-weighted count of called bases at the position.
/// When nothing was called there (every sample padded, or zero weight), every fraction
/// is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionBalance {
    /// 1-based
    pub position: usize,
    pub total_weight: f64,
    /// Fractions of A, C, G and T.
    pub bases: [f64; 4],
    pub blue: f64,
    pub green: f64,
    pub dark: f64,
}

impl PositionBalance {
    /// Tallies one column of a padded table. `weights[i]` is the weight of row `i`.
    #[must_use]
    pub fn from_column(
        position: usize,
        column: &[u8],
        weights: &[u32],
        chemistry: &ColorChemistry,
    ) -> Self {
        let mut counts = [0.0_f64; 4];
        for (&base, &weight) in column.iter().zip(weights) {
            if let Some(i) = CANONICAL_BASES.iter().position(|&b| b == base) {
                counts[i] += f64::from(weight);
            }
        }
        let total: f64 = counts.iter().sum();

        let mut balance = Self {
            position,
            total_weight: total,
            bases: [0.0; 4],
            blue: 0.0,
            green: 0.0,
            dark: 0.0,
        };
        if total <= 0.0 {
            return balance;
        }
        for (i, &base) in CANONICAL_BASES.iter().enumerate() {
            let fraction = counts[i] / total;
            balance.bases[i] = fraction;
            if let Some(w) = chemistry.weights(base) {
                balance.blue += fraction * w.blue;
                balance.green += fraction * w.green;
                balance.dark += fraction * w.dark;
            }
        }
        balance
    }

    /// True if bases were called here and the green fraction is under `min_green`.
    #[must_use]
    pub fn is_low_green(&self, min_green: f64) -> bool {
        self.total_weight > 0.0 && self.green < min_green
    }
}

/// Per-position balance of one index read on one lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBalanceSummary {
    pub lane: u32,
    pub read: IndexRead,
    pub positions: Vec<PositionBalance>,
}

impl ColorBalanceSummary {
    /// Summarizes a padded table whose rows are weighted by `weights`.
    #[must_use]
    pub fn from_padded(
        lane: u32,
        read: IndexRead,
        table: &PaddedIndexTable,
        weights: &[u32],
        chemistry: &ColorChemistry,
    ) -> Self {
        let positions = (1..=table.length())
            .filter_map(|p| table.column(p).map(|c| (p, c)))
            .map(|(p, column)| PositionBalance::from_column(p, &column, weights, chemistry))
            .collect();
        Self { lane, read, positions }
    }

    /// 1-based positions whose green fraction is under `min_green`.
    #[must_use]
    pub fn low_green_positions(&self, min_green: f64) -> Vec<usize> {
        self.positions.iter().filter(|p| p.is_low_green(min_green)).map(|p| p.position).collect()
    }
}

/// Balance of the i7 and, if any sample on the lane has one, the i5 of `lane`.
#[must_use]
pub fn lane_color_balance(
    samples: &SampleTable,
    run: &RunConfiguration,
    lane: u32,
    padding: PaddingLength,
) -> Vec<ColorBalanceSummary> {
    let rows: Vec<_> = samples.rows_on_lane(lane).into_iter().map(|i| &samples.records[i]).collect();
    if rows.is_empty() {
        return Vec::new();
    }
    let weights: Vec<u32> = rows.iter().map(|r| r.proportion).collect();

    let i7 = PaddedIndexTable::from_indexes(
        rows.iter().map(|r| (r.sample_id.as_str(), Some(r.index_i7.as_str()))),
        padding.resolve(&run.cycles, IndexRead::I7.segment()),
    );
    let mut summaries =
        vec![ColorBalanceSummary::from_padded(lane, IndexRead::I7, &i7, &weights, &run.chemistry)];

    let i5_indexes: Vec<Option<String>> =
        rows.iter().map(|r| r.effective_i5(run.i5_orientation)).collect();
    if i5_indexes.iter().any(Option::is_some) {
        let i5 = PaddedIndexTable::from_indexes(
            rows.iter().zip(&i5_indexes).map(|(r, i5)| (r.sample_id.as_str(), i5.as_deref())),
            padding.resolve(&run.cycles, IndexRead::I5.segment()),
        );
        summaries.push(ColorBalanceSummary::from_padded(
            lane,
            IndexRead::I5,
            &i5,
            &weights,
            &run.chemistry,
        ));
    }
    summaries
}

/// One warning per lane and index read with any low-green position.
#[must_use]
pub fn color_balance_warnings(
    summaries: &[ColorBalanceSummary],
    min_green: f64,
    max_listed: usize,
) -> Vec<ValidationResult> {
    summaries
        .iter()
        .filter_map(|summary| {
            let low = summary.low_green_positions(min_green);
            if low.is_empty() {
                return None;
            }
            Some(ValidationResult::warning(
                COLOR_BALANCE,
                format!(
                    "Lane {} {} has green-channel fraction below {min_green} at position(s): {}",
                    summary.lane,
                    summary.read,
                    enumerate_capped(low, max_listed)
                ),
            ))
        })
        .collect()
}
