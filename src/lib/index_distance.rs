//! Per-lane index distance matrices, and a single-shot background job computing them.
//!
//! The matrices are informational: they are computed regardless of validation outcome
//! and never gate a run. Building them is O(N²·L) per lane, so [`DistanceMatrixJob`]
//! runs them on a background thread while the consistency checks run on the caller's.
//!
//! ```text
//! ┌───────────────────┐  spawn   ┌─────────────────────┐
//! │ orchestrator      │─────────>│ index-distance      │  lanes in parallel (rayon)
//! │ (runs validators) │          │ thread              │
//! │                   │<─────────│                     │
//! └───────────────────┘  result  └─────────────────────┘
//!         wait()       (bounded(1) channel, Ok or error string)
//! ```
//!
//! There is no cancellation: once spawned the job runs to completion, and a dropped
//! job's result is discarded.

use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, bounded};
use rayon::prelude::*;

use crate::errors::panic_message;
use crate::mismatch::{DistanceMatrix, MatrixKind};
use crate::padding::{PaddedIndexTable, PaddingLength};
use crate::run_config::{ReadSegment, RunConfiguration};
use crate::sample::SampleTable;

/// Name of the result reporting a failed distance computation.
pub const INDEX_DISTANCE: &str = "index_distance";

/// Distance matrices keyed by lane, then by which indexes were compared.
pub type LaneDistanceMatrices = BTreeMap<u32, BTreeMap<MatrixKind, DistanceMatrix>>;

/// What the background job delivers: the matrices, or why they could not be computed.
pub type DistanceJobResult = std::result::Result<LaneDistanceMatrices, String>;

/// Matrices for one lane. The i5 and combined matrices are only built when at least one
/// sample on the lane has an i5.
#[must_use]
pub fn lane_distance_matrix(
    samples: &SampleTable,
    run: &RunConfiguration,
    lane: u32,
    padding: PaddingLength,
) -> BTreeMap<MatrixKind, DistanceMatrix> {
    let rows: Vec<_> = samples.rows_on_lane(lane).into_iter().map(|i| &samples.records[i]).collect();

    let i7 = PaddedIndexTable::from_indexes(
        rows.iter().map(|r| (r.sample_id.as_str(), Some(r.index_i7.as_str()))),
        padding.resolve(&run.cycles, ReadSegment::Index1),
    );
    let mut matrices = BTreeMap::new();
    matrices.insert(MatrixKind::I7, DistanceMatrix::from_padded(&i7));

    let i5_indexes: Vec<Option<String>> =
        rows.iter().map(|r| r.effective_i5(run.i5_orientation)).collect();
    if i5_indexes.iter().any(Option::is_some) {
        let i5 = PaddedIndexTable::from_indexes(
            rows.iter().zip(&i5_indexes).map(|(r, i5)| (r.sample_id.as_str(), i5.as_deref())),
            padding.resolve(&run.cycles, ReadSegment::Index2),
        );
        matrices.insert(MatrixKind::I7I5, DistanceMatrix::from_padded(&i7.concat(&i5)));
        matrices.insert(MatrixKind::I5, DistanceMatrix::from_padded(&i5));
    }
    matrices
}

/// Matrices for every lane used by `samples`, lanes computed in parallel.
#[must_use]
pub fn lane_distance_matrices(
    samples: &SampleTable,
    run: &RunConfiguration,
    padding: PaddingLength,
) -> LaneDistanceMatrices {
    samples
        .lanes()
        .into_par_iter()
        .map(|lane| (lane, lane_distance_matrix(samples, run, lane, padding)))
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

/// A single-shot background computation of [`lane_distance_matrices`].
pub struct DistanceMatrixJob {
    receiver: Receiver<DistanceJobResult>,
    handle: Option<JoinHandle<()>>,
}

impl DistanceMatrixJob {
    /// Starts computing the matrices of an immutable snapshot.
    #[must_use]
    pub fn spawn(
        samples: Arc<SampleTable>,
        run: Arc<RunConfiguration>,
        padding: PaddingLength,
    ) -> Self {
        let (tx, rx) = bounded(1);
        let handle = thread::spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(|| {
                lane_distance_matrices(&samples, &run, padding)
            }))
            .map_err(|payload| {
                format!("index distance computation panicked: {}", panic_message(&*payload))
            });
            // Receiver dropped: nobody wants the result any more.
            let _ = tx.send(result);
        });
        Self { receiver: rx, handle: Some(handle) }
    }

    /// Blocks until the job completes and returns its result.
    pub fn wait(mut self) -> DistanceJobResult {
        let result = self
            .receiver
            .recv()
            .map_err(|_| "index distance job ended without a result".to_string())
            .and_then(|r| r);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        result
    }
}
