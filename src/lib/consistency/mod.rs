//! Consistency checks over a sample table and run configuration.
//!
//! Every check is independent of the others, reads its inputs without modifying them,
//! and reports through [`ValidationResult`]s: an INFO result when it passes, ERROR
//! results for violations and WARNING results for advisory findings. All checks always
//! run; a failure in one never stops another.
//!
//! | check | name |
//! |-------|------|
//! | [`OverallConsistency`] | `overall_consistency` |
//! | [`LanesInRange`] | `lanes_in_range` |
//! | [`LaneSampleUniqueness`] | `lane_sample_uniqueness` |
//! | [`IndexPairUniqueness`] | `index_pair_uniqueness` |
//! | [`IndexLength`] | `index_length` |
//! | [`ApplicationSettings`] | `application_settings` |
//! | [`FieldFormat`] | `field_format` |
//! | [`OverrideCyclesGrammar`] | `override_cycles` |

use enum_dispatch::enum_dispatch;

use crate::options::ValidationContext;
use crate::results::{ValidationResult, enumerate_capped};
use crate::run_config::RunConfiguration;
use crate::sample::SampleTable;

pub mod application;
pub mod fields;
pub mod indexes;
pub mod lanes;
pub mod override_cycles;
pub mod schema;

pub use application::ApplicationSettings;
pub use fields::FieldFormat;
pub use indexes::{IndexLength, IndexPairUniqueness};
pub use lanes::{LaneSampleUniqueness, LanesInRange};
pub use override_cycles::OverrideCyclesGrammar;
pub use schema::OverallConsistency;

/// A single consistency check.
#[enum_dispatch]
pub trait ConsistencyCheck {
    /// Name carried by every result the check produces.
    fn name(&self) -> &'static str;

    /// Runs the check. Never fails: problems are returned as results.
    fn check(
        &self,
        samples: &SampleTable,
        run: &RunConfiguration,
        context: &ValidationContext,
    ) -> Vec<ValidationResult>;
}

#[enum_dispatch(ConsistencyCheck)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    OverallConsistency(OverallConsistency),
    LanesInRange(LanesInRange),
    LaneSampleUniqueness(LaneSampleUniqueness),
    IndexPairUniqueness(IndexPairUniqueness),
    IndexLength(IndexLength),
    ApplicationSettings(ApplicationSettings),
    FieldFormat(FieldFormat),
    OverrideCyclesGrammar(OverrideCyclesGrammar),
}

/// Every check, in reporting order.
#[must_use]
pub fn all_validators() -> Vec<Validator> {
    vec![
        OverallConsistency.into(),
        LanesInRange.into(),
        LaneSampleUniqueness.into(),
        IndexPairUniqueness.into(),
        IndexLength.into(),
        ApplicationSettings.into(),
        FieldFormat.into(),
        OverrideCyclesGrammar.into(),
    ]
}

/// An ERROR listing `problems` (capped) after `summary`, or an INFO with `passed` when
/// there are none.
pub(crate) fn error_or_info(
    name: &str,
    summary: &str,
    problems: &[String],
    passed: &str,
    max_listed: usize,
) -> ValidationResult {
    if problems.is_empty() {
        ValidationResult::info(name, passed)
    } else {
        ValidationResult::error(
            name,
            format!("{summary}: {}", enumerate_capped(problems, max_listed)),
        )
    }
}
