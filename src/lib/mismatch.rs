//! Pairwise mismatch matrices over padded index tables.

use std::fmt;

use fgsheet_dna::count_mismatches;
use serde::{Deserialize, Serialize};

use crate::padding::PaddedIndexTable;

/// Which index reads a distance matrix compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatrixKind {
    /// i7 followed by i5
    #[serde(rename = "i7_i5")]
    I7I5,
    #[serde(rename = "i7")]
    I7,
    #[serde(rename = "i5")]
    I5,
}

impl MatrixKind {
    pub const ALL: [MatrixKind; 3] = [MatrixKind::I7I5, MatrixKind::I7, MatrixKind::I5];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            MatrixKind::I7I5 => "i7_i5",
            MatrixKind::I7 => "i7",
            MatrixKind::I5 => "i5",
        }
    }
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Square, symmetric matrix of mismatch counts indexed by sample.
///
/// Diagonal entries are whatever comparing a sequence with itself yields (always zero
/// here) and carry no meaning; [`DistanceMatrix::pairs`] skips them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    sample_ids: Vec<String>,
    values: Vec<u32>,
}

impl DistanceMatrix {
    /// Compares every padded row against every other, exactly.
    #[must_use]
    pub fn from_padded(table: &PaddedIndexTable) -> Self {
        let rows = table.rows();
        let n = rows.len();
        let mut values = vec![0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let mismatches = count_mismatches(&rows[i], &rows[j]);
                values[i * n + j] = mismatches;
                values[j * n + i] = mismatches;
            }
        }
        Self { sample_ids: table.sample_ids().to_vec(), values }
    }

    #[must_use]
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sample_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sample_ids.is_empty()
    }

    /// Entry `(i, j)`, or `None` if either index is out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<u32> {
        let n = self.len();
        if i < n && j < n { Some(self.values[i * n + j]) } else { None }
    }

    /// Every unordered off-diagonal pair `(i, j, mismatches)` with `i < j`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        let n = self.len();
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j, self.values[i * n + j])))
    }

    /// Smallest off-diagonal entry, or `None` with fewer than two samples.
    #[must_use]
    pub fn min_off_diagonal(&self) -> Option<u32> {
        self.pairs().map(|(_, _, m)| m).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matrix(indexes: &[(&str, &str)], length: usize) -> DistanceMatrix {
        let table =
            PaddedIndexTable::from_indexes(indexes.iter().map(|(s, i)| (*s, Some(*i))), length);
        DistanceMatrix::from_padded(&table)
    }

    #[test]
    fn test_single_mismatch() {
        let m = matrix(&[("S1", "ACGT"), ("S2", "ACTT")], 4);
        assert_eq!(m.get(0, 1), Some(1));
        assert_eq!(m.get(1, 0), Some(1));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.min_off_diagonal(), Some(1));
    }

    #[test]
    fn test_short_index_padding_is_wildcard() {
        let m = matrix(&[("S1", "ACGTACGT"), ("S2", "ACGTACGTAC"), ("S3", "TTTTTTTTTT")], 10);
        assert_eq!(m.get(0, 1), Some(0));
        assert_eq!(m.get(0, 2), Some(6));
        assert_eq!(m.get(1, 2), Some(8));
        assert_eq!(m.pairs().count(), 3);
    }

    #[test]
    fn test_single_sample_has_no_pairs() {
        let m = matrix(&[("S1", "ACGT")], 4);
        assert_eq!(m.len(), 1);
        assert!(m.min_off_diagonal().is_none());
    }

    #[test]
    fn test_matrix_kind_serializes_to_key() {
        for kind in MatrixKind::ALL {
            assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{}\"", kind.key()));
        }
    }

    proptest! {
        #[test]
        fn prop_matrix_is_symmetric(indexes in prop::collection::vec("[ACGTN]{0,10}", 0..12)) {
            let table = PaddedIndexTable::from_indexes(
                indexes.iter().map(|i| ("S", Some(i.as_str()))),
                10,
            );
            let m = DistanceMatrix::from_padded(&table);
            for i in 0..m.len() {
                for j in 0..m.len() {
                    prop_assert_eq!(m.get(i, j), m.get(j, i));
                }
            }
        }
    }
}
