//! Index checks: collisions within a lane, and index lengths against the run's cycles.

use itertools::Itertools;
use log::debug;

use super::{ConsistencyCheck, error_or_info};
use crate::options::ValidationContext;
use crate::results::ValidationResult;
use crate::run_config::RunConfiguration;
use crate::sample::SampleTable;

pub const INDEX_PAIR_UNIQUENESS: &str = "index_pair_uniqueness";
pub const INDEX_LENGTH: &str = "index_length";

/// True if `a` and `b` agree over the length of the shorter one.
fn prefixes_match(a: &str, b: &str) -> bool {
    let n = a.len().min(b.len());
    a.as_bytes()[..n] == b.as_bytes()[..n]
}

/// No two samples on the same lane may share an index pair. Indexes are compared up to
/// the shorter of the two lengths, i7 and i5 separately, with the i5 as the instrument
/// reads it. A missing i5 matches any i5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexPairUniqueness;

impl ConsistencyCheck for IndexPairUniqueness {
    fn name(&self) -> &'static str {
        INDEX_PAIR_UNIQUENESS
    }

    fn check(
        &self,
        samples: &SampleTable,
        run: &RunConfiguration,
        context: &ValidationContext,
    ) -> Vec<ValidationResult> {
        debug!("Checking index pair uniqueness within lanes");
        let mut problems = Vec::new();
        for lane in samples.lanes() {
            let rows: Vec<_> = samples
                .rows_on_lane(lane)
                .into_iter()
                .map(|i| {
                    let record = &samples.records[i];
                    let i5 = record.effective_i5(run.i5_orientation).unwrap_or_default();
                    (record, i5)
                })
                .collect();

            for ((a, a_i5), (b, b_i5)) in rows.iter().tuple_combinations() {
                if prefixes_match(&a.index_i7, &b.index_i7) && prefixes_match(a_i5, b_i5) {
                    problems.push(format!(
                        "lane {lane}: {} ({}+{}) and {} ({}+{})",
                        a.sample_id, a.index_i7, a_i5, b.sample_id, b.index_i7, b_i5
                    ));
                }
            }
        }

        vec![error_or_info(
            INDEX_PAIR_UNIQUENESS,
            "Samples share an index pair",
            &problems,
            "Index pairs are unique within every lane",
            context.options.max_listed,
        )]
    }
}

/// i7 and i5 may not be longer than the Index1 and Index2 reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexLength;

impl ConsistencyCheck for IndexLength {
    fn name(&self) -> &'static str {
        INDEX_LENGTH
    }

    fn check(
        &self,
        samples: &SampleTable,
        run: &RunConfiguration,
        context: &ValidationContext,
    ) -> Vec<ValidationResult> {
        debug!("Checking index lengths against index cycles");
        let index1 = run.cycles.index1 as usize;
        let index2 = run.cycles.index2 as usize;

        let mut problems = Vec::new();
        for record in &samples.records {
            if record.index_i7.len() > index1 {
                problems.push(format!(
                    "{} i7 is {} bases but Index1 has {index1} cycles",
                    record.sample_id,
                    record.index_i7.len()
                ));
            }
            if let Some(i5) = &record.index_i5 {
                if i5.len() > index2 {
                    problems.push(format!(
                        "{} i5 is {} bases but Index2 has {index2} cycles",
                        record.sample_id,
                        i5.len()
                    ));
                }
            }
        }

        vec![error_or_info(
            INDEX_LENGTH,
            "Index longer than its index read",
            &problems,
            "Every index fits within its index read",
            context.options.max_listed,
        )]
    }
}
