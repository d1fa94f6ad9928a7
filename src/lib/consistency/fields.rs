//! Per-field formats.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::{ConsistencyCheck, error_or_info};
use crate::options::ValidationContext;
use crate::results::{Severity, ValidationResult, enumerate_capped};
use crate::run_config::RunConfiguration;
use crate::sample::{SampleRecord, SampleTable};

pub const FIELD_FORMAT: &str = "field_format";

/// Largest number of mismatches a demultiplexer may allow per index.
pub const MAX_BARCODE_MISMATCHES: i64 = 4;

static INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ACGT]+$").expect("index pattern is a valid regex"));

static ADAPTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ACGT+]+$").expect("adapter pattern is a valid regex"));

static SAMPLE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("sample id pattern is a valid regex"));

/// Every field holds a value of the right shape, and every cell was coerced at ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldFormat;

impl FieldFormat {
    fn record_problems(record: &SampleRecord, min_id_length: usize, problems: &mut Vec<String>) {
        let id = &record.sample_id;
        if id.is_empty() {
            problems.push("empty Sample_ID".to_string());
        } else {
            if id.len() < min_id_length {
                problems.push(format!("Sample_ID '{id}' is shorter than {min_id_length}"));
            }
            if !SAMPLE_ID.is_match(id) {
                problems.push(format!(
                    "Sample_ID '{id}' may only contain letters, digits, '-' and '_'"
                ));
            }
        }

        if record.lanes.is_empty() {
            problems.push(format!("{id}: no lane given"));
        }
        if !INDEX.is_match(&record.index_i7) {
            problems.push(format!("{id}: IndexI7 '{}' is not an A/C/G/T sequence", record.index_i7));
        }
        if let Some(i5) = &record.index_i5 {
            if !INDEX.is_match(i5) {
                problems.push(format!("{id}: IndexI5 '{i5}' is not an A/C/G/T sequence"));
            }
        }
        for (column, adapter) in
            [("AdapterRead1", &record.adapter_read1), ("AdapterRead2", &record.adapter_read2)]
        {
            if let Some(adapter) = adapter {
                if !ADAPTER.is_match(adapter) {
                    problems.push(format!(
                        "{id}: {column} '{adapter}' may only contain A, C, G, T and '+'"
                    ));
                }
            }
        }
        for (column, mismatches) in [
            ("BarcodeMismatchesIndex1", record.barcode_mismatches_index1),
            ("BarcodeMismatchesIndex2", record.barcode_mismatches_index2),
        ] {
            if !(0..=MAX_BARCODE_MISMATCHES).contains(&mismatches) {
                problems.push(format!(
                    "{id}: {column} {mismatches} is not in [0, {MAX_BARCODE_MISMATCHES}]"
                ));
            }
        }
    }
}

impl ConsistencyCheck for FieldFormat {
    fn name(&self) -> &'static str {
        FIELD_FORMAT
    }

    fn check(
        &self,
        samples: &SampleTable,
        _run: &RunConfiguration,
        context: &ValidationContext,
    ) -> Vec<ValidationResult> {
        debug!("Checking field formats");
        let (errors, defaults): (Vec<_>, Vec<_>) =
            samples.issues.iter().partition(|i| i.severity == Severity::Error);
        let mut problems: Vec<String> = errors.iter().map(ToString::to_string).collect();
        for record in &samples.records {
            Self::record_problems(record, context.options.min_sample_id_length, &mut problems);
        }

        let mut results = vec![error_or_info(
            FIELD_FORMAT,
            "Malformed field(s)",
            &problems,
            "Every field is well formed",
            context.options.max_listed,
        )];
        if !defaults.is_empty() {
            let defaults: Vec<String> = defaults.iter().map(ToString::to_string).collect();
            results.push(ValidationResult::warning(
                FIELD_FORMAT,
                format!(
                    "Default value(s) applied: {}",
                    enumerate_capped(&defaults, context.options.max_listed)
                ),
            ));
        }
        results
    }
}
