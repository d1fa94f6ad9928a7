//! Override-cycles patterns of every sample.

use log::debug;

use super::{ConsistencyCheck, error_or_info};
use crate::options::ValidationContext;
use crate::override_cycles::OverrideCyclesPattern;
use crate::results::ValidationResult;
use crate::run_config::RunConfiguration;
use crate::sample::SampleTable;

pub const OVERRIDE_CYCLES: &str = "override_cycles";

/// Every sample's pattern parses and resolves against the run's read cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverrideCyclesGrammar;

impl ConsistencyCheck for OverrideCyclesGrammar {
    fn name(&self) -> &'static str {
        OVERRIDE_CYCLES
    }

    fn check(
        &self,
        samples: &SampleTable,
        run: &RunConfiguration,
        context: &ValidationContext,
    ) -> Vec<ValidationResult> {
        debug!("Checking override cycles patterns");
        let problems: Vec<String> = samples
            .records
            .iter()
            .filter_map(|record| {
                OverrideCyclesPattern::parse(&record.override_cycles_pattern)
                    .and_then(|pattern| pattern.resolve(&run.cycles))
                    .err()
                    .map(|e| format!("{} '{}': {e}", record.sample_id, record.override_cycles_pattern))
            })
            .collect();

        vec![error_or_info(
            OVERRIDE_CYCLES,
            "Invalid override cycles",
            &problems,
            "Every override cycles pattern resolves against the run's cycles",
            context.options.max_listed,
        )]
    }
}
