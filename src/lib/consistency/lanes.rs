//! Lane assignment checks.

use std::collections::BTreeMap;

use itertools::Itertools;
use log::debug;

use super::{ConsistencyCheck, error_or_info};
use crate::options::ValidationContext;
use crate::results::{ValidationResult, enumerate_capped};
use crate::run_config::RunConfiguration;
use crate::sample::SampleTable;

pub const LANES_IN_RANGE: &str = "lanes_in_range";
pub const LANE_SAMPLE_UNIQUENESS: &str = "lane_sample_uniqueness";

/// Every lane a sample uses must be one of the run's allowed lanes. Allowed lanes no
/// sample uses are reported as a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanesInRange;

impl ConsistencyCheck for LanesInRange {
    fn name(&self) -> &'static str {
        LANES_IN_RANGE
    }

    fn check(
        &self,
        samples: &SampleTable,
        run: &RunConfiguration,
        context: &ValidationContext,
    ) -> Vec<ValidationResult> {
        debug!("Checking sample lanes against allowed lanes {:?}", run.allowed_lanes);
        let cap = context.options.max_listed;

        let problems: Vec<String> = samples
            .records
            .iter()
            .filter_map(|r| {
                let outside = r.lanes.difference(&run.allowed_lanes).join(", ");
                (!outside.is_empty()).then(|| format!("{} (lane {outside})", r.sample_id))
            })
            .collect();
        let allowed = run.allowed_lanes.iter().join(", ");
        let mut results = vec![error_or_info(
            LANES_IN_RANGE,
            &format!("Sample(s) assigned to lanes outside the allowed lanes {allowed}"),
            &problems,
            &format!("All sample lanes are within the allowed lanes {allowed}"),
            cap,
        )];

        let used = samples.lanes();
        let unused: Vec<u32> = run.allowed_lanes.difference(&used).copied().collect();
        if !unused.is_empty() {
            results.push(ValidationResult::warning(
                LANES_IN_RANGE,
                format!("Allowed lane(s) not used by any sample: {}", enumerate_capped(unused, cap)),
            ));
        }
        results
    }
}

/// After exploding multi-lane samples into one row per lane, no `(Sample_ID, lane)`
/// pair may repeat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaneSampleUniqueness;

impl ConsistencyCheck for LaneSampleUniqueness {
    fn name(&self) -> &'static str {
        LANE_SAMPLE_UNIQUENESS
    }

    fn check(
        &self,
        samples: &SampleTable,
        _run: &RunConfiguration,
        context: &ValidationContext,
    ) -> Vec<ValidationResult> {
        debug!("Checking Sample_ID uniqueness within lanes");
        let mut counts: BTreeMap<(u32, &str), usize> = BTreeMap::new();
        for (row, lane) in samples.explode_lanes() {
            *counts.entry((lane, samples.records[row].sample_id.as_str())).or_default() += 1;
        }
        let problems: Vec<String> = counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|((lane, id), n)| format!("{id} appears {n} times on lane {lane}"))
            .collect();

        vec![error_or_info(
            LANE_SAMPLE_UNIQUENESS,
            "Duplicate Sample_ID within a lane",
            &problems,
            "Sample_IDs are unique within every lane",
            context.options.max_listed,
        )]
    }
}
