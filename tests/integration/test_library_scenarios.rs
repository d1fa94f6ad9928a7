//! End-to-end validation of sample sheets read from disk.

use std::sync::Arc;

use fgsheet_lib::application::ApplicationCatalog;
use fgsheet_lib::consistency::application::APPLICATION_SETTINGS;
use fgsheet_lib::consistency::indexes::INDEX_PAIR_UNIQUENESS;
use fgsheet_lib::consistency::lanes::{LANE_SAMPLE_UNIQUENESS, LANES_IN_RANGE};
use fgsheet_lib::consistency::schema::OVERALL_CONSISTENCY;
use fgsheet_lib::color_balance::COLOR_BALANCE;
use fgsheet_lib::mismatch::MatrixKind;
use fgsheet_lib::options::{ValidationContext, ValidationOptions};
use fgsheet_lib::orchestrator::{OrchestratorState, ValidationOrchestrator};
use fgsheet_lib::run_config::{ReadCycles, RunConfiguration};
use fgsheet_lib::sample::{SampleRecord, SampleTable};
use fgsheet_lib::source::{DelimitedSampleSheet, SampleSheetSource, SampleSheetStore};
use fgsheet_lib::{Severity, ValidationReport};

use crate::helpers::{
    PATTERN, SheetFiles, assert_no_errors, assert_result, row, run_config_json,
};

fn clean_rows() -> Vec<String> {
    vec![
        row("Sample1", "1", "ACGTACGT", "AACCGGTT", "BCLConvert;DragenGermline", PATTERN),
        row("Sample2", "1", "TGCATGCA", "CCGGTTAA", "BCLConvert", PATTERN),
        row("Sample3", "1", "GATCGATC", "GGTTAACC", "BCLConvert", "U3Y{r}-I{i}-I{i}-Y{r}"),
        row("Sample4", "1", "CTAGCTAG", "TTAACCGG", "BCLConvert", PATTERN),
    ]
}

fn validate_files(files: &SheetFiles) -> ValidationReport {
    let catalog = ApplicationCatalog::from_path(&files.profiles).unwrap();
    let context = ValidationContext::new(catalog, ValidationOptions::default());
    let source = DelimitedSampleSheet::new(&files.samples, &files.run_config);
    ValidationOrchestrator::new(&context).validate(&source)
}

#[test]
fn test_clean_sheet_passes() {
    let files = SheetFiles::new(&clean_rows(), &run_config_json([151, 8, 8, 151], &[1]));
    let report = validate_files(&files);

    assert_no_errors(&report);
    assert_eq!(report.count(Severity::Warning), 0);
    let lane1 = &report.distance_matrices[&1];
    assert_eq!(lane1.keys().copied().collect::<Vec<_>>(), MatrixKind::ALL.to_vec());
    assert_eq!(lane1[&MatrixKind::I7].len(), 4);
    assert_eq!(report.color_balance.len(), 2);
    assert_eq!(report.override_cycles[2].resolved.as_deref(), Some("U3Y148-I8-I8-Y151"));
}

#[test]
fn test_shared_index_pair_is_an_error() {
    let rows = vec![
        row("Sample1", "1", "ACGTACGT", "", "BCLConvert", PATTERN),
        row("Sample2", "1", "ACGTACGT", "", "BCLConvert", PATTERN),
    ];
    let files = SheetFiles::new(&rows, &run_config_json([151, 8, 8, 151], &[1]));
    let report = validate_files(&files);

    assert!(!report.passed);
    assert_result(
        &report,
        INDEX_PAIR_UNIQUENESS,
        Severity::Error,
        &["lane 1", "Sample1", "Sample2"],
    );
    assert_eq!(report.distance_matrices[&1][&MatrixKind::I7].get(0, 1), Some(0));
}

#[test]
fn test_unused_lanes_warn_without_failing() {
    let mut rows = clean_rows();
    rows[0] = row("Sample1", "1,2", "ACGTACGT", "AACCGGTT", "BCLConvert", PATTERN);
    let files = SheetFiles::new(&rows, &run_config_json([151, 8, 8, 151], &[1, 2, 3, 4]));
    let report = validate_files(&files);

    assert!(report.passed);
    assert_result(&report, LANES_IN_RANGE, Severity::Info, &[]);
    assert_result(&report, LANES_IN_RANGE, Severity::Warning, &["3; 4"]);
}

#[test]
fn test_all_a_positions_warn_low_green() {
    let rows = vec![
        row("Sample1", "1", "AAAAACGT", "", "BCLConvert", PATTERN),
        row("Sample2", "1", "AAAATGCA", "", "BCLConvert", PATTERN),
        row("Sample3", "1", "AAAAGTAC", "", "BCLConvert", PATTERN),
        row("Sample4", "1", "AAAACATG", "", "BCLConvert", PATTERN),
    ];
    let files = SheetFiles::new(&rows, &run_config_json([151, 8, 8, 151], &[1]));
    let report = validate_files(&files);

    assert!(report.passed);
    assert_result(&report, COLOR_BALANCE, Severity::Warning, &["Lane 1 i7", "1; 2; 3; 4"]);
    let first = &report.color_balance[0].positions[0];
    assert!((first.blue - 1.0).abs() < 1e-9);
    assert!(first.green.abs() < 1e-9);
    assert!(first.dark.abs() < 1e-9);
}

#[test]
fn test_conflicting_profile_settings() {
    let mut rows = clean_rows();
    rows[1] = row("Sample2", "1", "TGCATGCA", "CCGGTTAA", "BCLConvertMask", PATTERN);
    let files = SheetFiles::new(&rows, &run_config_json([151, 8, 8, 151], &[1]));
    let report = validate_files(&files);

    assert!(!report.passed);
    assert_result(
        &report,
        APPLICATION_SETTINGS,
        Severity::Error,
        &["BCLConvert, BCLConvertMask", "AdapterBehavior"],
    );
}

#[test]
fn test_unreadable_run_configuration() {
    let files = SheetFiles::new(&clean_rows(), "{ not json");
    let report = validate_files(&files);

    assert!(!report.passed);
    assert_eq!(report.results.len(), 1);
    assert_result(&report, OVERALL_CONSISTENCY, Severity::Error, &["run configuration"]);
}

#[test]
fn test_long_violation_lists_are_capped() {
    let rows: Vec<String> =
        (0..15).map(|_| row("DUP", "1", "ACGTACGT", "", "BCLConvert", PATTERN)).collect();
    let files = SheetFiles::new(&rows, &run_config_json([151, 8, 8, 151], &[1]));
    let report = validate_files(&files);

    // 15 identical rows: 105 colliding pairs, ten listed.
    assert_result(&report, INDEX_PAIR_UNIQUENESS, Severity::Error, &["... and 95 more not shown"]);
    assert_result(&report, LANE_SAMPLE_UNIQUENESS, Severity::Error, &["DUP appears 15 times on lane 1"]);
}

#[test]
fn test_store_edits_between_passes() {
    let store = Arc::new(SampleSheetStore::new(SampleTable::new(vec![
        SampleRecord::new("Sample1", [1], "ACGTACGT", PATTERN),
        SampleRecord::new("Sample2", [1], "ACGTACGT", PATTERN),
    ])));
    store
        .commit_run_configuration(RunConfiguration::new(ReadCycles::new(151, 8, 8, 151), [1]))
        .unwrap();

    let context = ValidationContext::default();
    let mut orchestrator = ValidationOrchestrator::new(&context);
    let taken = store.snapshot().unwrap();
    assert!(!orchestrator.validate(&*store).passed);
    assert_eq!(orchestrator.state(), OrchestratorState::Validated);

    assert!(store.edit_sample(1, |r| r.index_i7 = "TGCATGCA".to_string()));
    assert!(orchestrator.validate(&*store).passed);

    // A snapshot taken before the edit still fails.
    assert!(!orchestrator.validate(&taken).passed);
}

#[test]
fn test_repeated_validation_is_identical() {
    let mut rows = clean_rows();
    rows.push(row("Sample5", "1,2", "ACGTAC", "", "Missing", "Y{r}-I6N{i}-I{i}-Y{r}"));
    let files = SheetFiles::new(&rows, &run_config_json([151, 8, 8, 151], &[1, 2]));
    assert_eq!(validate_files(&files), validate_files(&files));
}
