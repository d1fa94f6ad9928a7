//! Padding of variable-length index sequences into fixed-width per-position tables.
//!
//! Position `k` of a padded index holds the `k`th base of the index, or the no-call
//! sentinel if the index is shorter than `k`. Indexes longer than the target length are
//! truncated. The padded form feeds both the mismatch matrices and color balance.

use fgsheet_dna::NO_CALL_BASE;
use serde::{Deserialize, Serialize};

use crate::run_config::{ReadCycles, ReadSegment};

/// Length of most commercial index kits.
pub const DEFAULT_INDEX_LENGTH: usize = 10;

/// How the target length of a padded index table is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaddingLength {
    /// Always pad to this many positions.
    Fixed(usize),
    /// Pad to the configured cycles of the index read being padded.
    #[default]
    RunCycles,
}

impl PaddingLength {
    /// Target length for the index read `segment` of a run with `cycles`.
    #[must_use]
    pub fn resolve(self, cycles: &ReadCycles, segment: ReadSegment) -> usize {
        match self {
            PaddingLength::Fixed(length) => length,
            PaddingLength::RunCycles => cycles.for_segment(segment) as usize,
        }
    }
}

/// Pads (or truncates) `index` to exactly `length` bytes.
///
/// # Example
/// ```
/// use fgsheet_lib::padding::pad_index;
///
/// assert_eq!(pad_index("ACGT", 6), b"ACGTNN".to_vec());
/// assert_eq!(pad_index("ACGTACGT", 4), b"ACGT".to_vec());
/// ```
#[must_use]
pub fn pad_index(index: &str, length: usize) -> Vec<u8> {
    let bytes = index.as_bytes();
    (0..length).map(|k| bytes.get(k).copied().unwrap_or(NO_CALL_BASE)).collect()
}

/// A wide table of padded indexes: one row per sample, one column per position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaddedIndexTable {
    sample_ids: Vec<String>,
    length: usize,
    rows: Vec<Vec<u8>>,
}

impl PaddedIndexTable {
    /// Pads every `(sample_id, index)` pair to `length`. A missing index pads to all
    /// no-calls.
    #[must_use]
    pub fn from_indexes<'a, I>(indexes: I, length: usize) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut table = Self { sample_ids: Vec::new(), length, rows: Vec::new() };
        for (sample_id, index) in indexes {
            table.sample_ids.push(sample_id.to_string());
            table.rows.push(pad_index(index.unwrap_or(""), length));
        }
        table
    }

    /// Joins the rows of `self` and `other` end to end (e.g. i7 followed by i5).
    /// Both tables must describe the same samples in the same order.
    #[must_use]
    pub fn concat(&self, other: &PaddedIndexTable) -> Self {
        debug_assert_eq!(self.sample_ids, other.sample_ids);
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a.iter().chain(b).copied().collect())
            .collect();
        Self { sample_ids: self.sample_ids.clone(), length: self.length + other.length, rows }
    }

    #[must_use]
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Number of positions per row.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// The bases at 1-based `position` across all samples, or `None` if out of range.
    #[must_use]
    pub fn column(&self, position: usize) -> Option<Vec<u8>> {
        if position == 0 || position > self.length {
            return None;
        }
        Some(self.rows.iter().map(|row| row[position - 1]).collect())
    }
}
