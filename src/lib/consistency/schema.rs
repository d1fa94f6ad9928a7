//! Shape of the table as a whole.

use std::collections::BTreeSet;

use log::debug;

use super::ConsistencyCheck;
use crate::options::ValidationContext;
use crate::results::{ValidationResult, enumerate_capped};
use crate::run_config::RunConfiguration;
use crate::sample::{OPTIONAL_COLUMNS, REQUIRED_COLUMNS, SampleTable};

pub const OVERALL_CONSISTENCY: &str = "overall_consistency";

/// The table is non-empty and its columns are exactly the known ones: every required
/// column present, nothing unknown, nothing repeated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverallConsistency;

impl ConsistencyCheck for OverallConsistency {
    fn name(&self) -> &'static str {
        OVERALL_CONSISTENCY
    }

    fn check(
        &self,
        samples: &SampleTable,
        _run: &RunConfiguration,
        context: &ValidationContext,
    ) -> Vec<ValidationResult> {
        debug!("Checking overall consistency of {} samples", samples.len());
        let cap = context.options.max_listed;
        let mut results = Vec::new();

        let declared: BTreeSet<&str> = samples.columns.iter().map(String::as_str).collect();
        let missing: Vec<&str> =
            REQUIRED_COLUMNS.iter().copied().filter(|c| !declared.contains(c)).collect();
        if !missing.is_empty() {
            results.push(ValidationResult::error(
                OVERALL_CONSISTENCY,
                format!("Missing required column(s): {}", enumerate_capped(missing, cap)),
            ));
        }

        let unknown: Vec<&str> = samples
            .columns
            .iter()
            .map(String::as_str)
            .filter(|c| !REQUIRED_COLUMNS.contains(c) && !OPTIONAL_COLUMNS.contains(c))
            .collect();
        if !unknown.is_empty() {
            results.push(ValidationResult::error(
                OVERALL_CONSISTENCY,
                format!("Unexpected column(s): {}", enumerate_capped(unknown, cap)),
            ));
        }

        if declared.len() != samples.columns.len() {
            let mut seen = BTreeSet::new();
            let repeated: BTreeSet<&str> =
                samples.columns.iter().map(String::as_str).filter(|c| !seen.insert(*c)).collect();
            results.push(ValidationResult::error(
                OVERALL_CONSISTENCY,
                format!("Repeated column(s): {}", enumerate_capped(repeated, cap)),
            ));
        }

        if samples.is_empty() {
            results.push(ValidationResult::error(OVERALL_CONSISTENCY, "Sample table is empty"));
        }

        if results.is_empty() {
            results.push(ValidationResult::info(
                OVERALL_CONSISTENCY,
                format!("{} samples with the expected columns", samples.len()),
            ));
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consistency::test_support::{run, sample};
    use crate::results::Severity;

    fn check(samples: &SampleTable) -> Vec<ValidationResult> {
        OverallConsistency.check(samples, &run(&[1]), &ValidationContext::default())
    }

    #[test]
    fn test_passes() {
        let results = check(&SampleTable::new(vec![sample("S1", &[1], "ACGTACGT")]));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].severity, Severity::Info);
        assert_eq!(results[0].message, "1 samples with the expected columns");
    }

    #[test]
    fn test_empty_table() {
        let results = check(&SampleTable::new(Vec::new()));
        assert_eq!(results, vec![ValidationResult::error(OVERALL_CONSISTENCY, "Sample table is empty")]);
    }

    #[test]
    fn test_column_problems() {
        let mut samples = SampleTable::new(vec![sample("S1", &[1], "ACGTACGT")]);
        samples.columns.retain(|c| c != "Lane" && c != "IndexI7");
        samples.columns.push("Description".to_string());
        samples.columns.push("Sample_ID".to_string());

        let messages: Vec<String> = check(&samples).into_iter().map(|r| r.message).collect();
        assert_eq!(
            messages,
            vec![
                "Missing required column(s): Lane; IndexI7",
                "Unexpected column(s): Description",
                "Repeated column(s): Sample_ID",
            ]
        );
    }
}
