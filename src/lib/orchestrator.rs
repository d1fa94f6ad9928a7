//! Runs a complete validation pass.
//!
//! A pass takes one snapshot of the sample sheet, then:
//!
//! 1. starts the index distance matrices on a background thread,
//! 2. runs every consistency check, collecting all results whatever earlier checks found,
//! 3. computes color balance and the resolved override cycles of every sample,
//! 4. joins the distance job,
//!
//! and passes iff no result is an ERROR. Nothing is cached between passes: every pass
//! recomputes everything from its snapshot, so validating an unchanged sheet twice gives
//! identical reports.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::color_balance::{
    COLOR_BALANCE, ColorBalanceSummary, color_balance_warnings, lane_color_balance,
};
use crate::consistency::override_cycles::OVERRIDE_CYCLES;
use crate::consistency::schema::OVERALL_CONSISTENCY;
use crate::consistency::{ConsistencyCheck, all_validators};
use crate::errors::{FgsheetError, panic_message};
use crate::index_distance::{DistanceMatrixJob, INDEX_DISTANCE, LaneDistanceMatrices};
use crate::logging::{OperationTimer, log_validation_summary};
use crate::options::ValidationContext;
use crate::override_cycles::{OverrideCyclesPattern, ResolvedOverrideCycles};
use crate::results::{Severity, ValidationResult, all_passed};
use crate::run_config::RunConfiguration;
use crate::sample::SampleTable;
use crate::source::{SampleSheetSource, Snapshot};

/// Name of the result reporting an unusable run configuration.
pub const RUN_CONFIGURATION: &str = "run_configuration";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrchestratorState {
    #[default]
    Idle,
    Validated,
}

/// Everything one validation pass produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub results: Vec<ValidationResult>,
    pub distance_matrices: LaneDistanceMatrices,
    pub color_balance: Vec<ColorBalanceSummary>,
    pub override_cycles: Vec<ResolvedOverrideCycles>,
    pub passed: bool,
}

impl ValidationReport {
    /// A report holding only `results`.
    #[must_use]
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let passed = all_passed(&results);
        Self {
            results,
            distance_matrices: LaneDistanceMatrices::new(),
            color_balance: Vec::new(),
            override_cycles: Vec::new(),
            passed,
        }
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.results.iter().filter(|r| r.severity == severity).count()
    }

    /// Results with the given name, in report order.
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ValidationResult> + 'a {
        self.results.iter().filter(move |r| r.name == name)
    }
}

/// Drives validation passes. Holds no validation state between passes beyond which
/// state it is in.
#[derive(Debug)]
pub struct ValidationOrchestrator<'c> {
    context: &'c ValidationContext,
    state: OrchestratorState,
}

impl<'c> ValidationOrchestrator<'c> {
    #[must_use]
    pub fn new(context: &'c ValidationContext) -> Self {
        Self { context, state: OrchestratorState::Idle }
    }

    #[must_use]
    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    /// Snapshots `source` and validates it. A snapshot that cannot be taken yields a
    /// failed report rather than an error.
    pub fn validate<S: SampleSheetSource + ?Sized>(&mut self, source: &S) -> ValidationReport {
        self.validate_outcome(source.snapshot().as_ref())
    }

    /// Validates the outcome of an attempt to take a snapshot, for callers that keep
    /// the snapshot for themselves.
    pub fn validate_outcome(
        &mut self,
        snapshot: std::result::Result<&Snapshot, &FgsheetError>,
    ) -> ValidationReport {
        let timer = OperationTimer::new("Validating sample sheet");
        let (report, samples) = match snapshot {
            Ok(snapshot) => (self.validate_snapshot(snapshot), snapshot.samples.len()),
            Err(e) => {
                let result = ValidationResult::error(
                    OVERALL_CONSISTENCY,
                    format!("Could not read the sample sheet: {e}"),
                );
                (ValidationReport::from_results(vec![result]), 0)
            }
        };
        self.state = OrchestratorState::Validated;
        timer.log_completion(samples as u64);
        log_validation_summary(&report);
        report
    }

    /// Validates an already-taken snapshot.
    #[must_use]
    pub fn validate_snapshot(&self, snapshot: &Snapshot) -> ValidationReport {
        let samples: &SampleTable = &snapshot.samples;
        let run: &RunConfiguration = &snapshot.run;
        let options = &self.context.options;
        info!("Validating {} samples across {} lane(s)", samples.len(), samples.lanes().len());

        let job = DistanceMatrixJob::spawn(
            Arc::clone(&snapshot.samples),
            Arc::clone(&snapshot.run),
            options.padding,
        );

        let mut results = Vec::new();
        if let Err(e) = run.validate() {
            results.push(ValidationResult::error(RUN_CONFIGURATION, e.to_string()));
        }
        for validator in all_validators() {
            let found = guarded(validator.name(), &mut results, || {
                validator.check(samples, run, self.context)
            });
            results.extend(found.unwrap_or_default());
        }

        let color_balance: Vec<ColorBalanceSummary> = guarded(COLOR_BALANCE, &mut results, || {
            samples
                .lanes()
                .into_iter()
                .flat_map(|lane| lane_color_balance(samples, run, lane, options.padding))
                .collect()
        })
        .unwrap_or_default();
        results.extend(color_balance_warnings(
            &color_balance,
            options.min_green_fraction,
            options.max_listed,
        ));

        let override_cycles =
            guarded(OVERRIDE_CYCLES, &mut results, || resolve_all_override_cycles(samples, run))
                .unwrap_or_default();

        let distance_matrices = match job.wait() {
            Ok(matrices) => matrices,
            Err(message) => {
                results.push(ValidationResult::error(INDEX_DISTANCE, message));
                LaneDistanceMatrices::new()
            }
        };

        let passed = all_passed(&results);
        ValidationReport { results, distance_matrices, color_balance, override_cycles, passed }
    }
}

/// Runs one step of a pass. A panic becomes an ERROR named `name` in `results` and the
/// step yields `None`.
fn guarded<T>(
    name: &str,
    results: &mut Vec<ValidationResult>,
    step: impl FnOnce() -> T,
) -> Option<T> {
    match catch_unwind(AssertUnwindSafe(step)) {
        Ok(value) => Some(value),
        Err(payload) => {
            results.push(ValidationResult::error(
                name,
                format!("check failed unexpectedly: {}", panic_message(&*payload)),
            ));
            None
        }
    }
}

/// The resolved override cycles of every sample, `None` where resolution fails.
#[must_use]
pub fn resolve_all_override_cycles(
    samples: &SampleTable,
    run: &RunConfiguration,
) -> Vec<ResolvedOverrideCycles> {
    samples
        .records
        .iter()
        .map(|record| ResolvedOverrideCycles {
            sample_id: record.sample_id.clone(),
            pattern: record.override_cycles_pattern.clone(),
            resolved: OverrideCyclesPattern::parse(&record.override_cycles_pattern)
                .and_then(|p| p.resolve(&run.cycles))
                .ok(),
        })
        .collect()
}
