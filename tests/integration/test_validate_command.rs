//! Tests of `fgsheet validate` run as a subprocess.

use std::fs;

use crate::helpers::{PATTERN, SheetFiles, arg, fgsheet, row, run_config_json};

fn clean_files() -> SheetFiles {
    let rows = vec![
        row("Sample1", "1", "ACGTACGT", "AACCGGTT", "BCLConvert", PATTERN),
        row("Sample2", "1", "TGCATGCA", "CCGGTTAA", "BCLConvert", PATTERN),
    ];
    SheetFiles::new(&rows, &run_config_json([151, 8, 8, 151], &[1]))
}

#[test]
fn test_validate_writes_outputs() {
    let files = clean_files();
    let report = files.output("sheet.json");
    let distances = files.output("distances.tsv");
    let balance = files.output("balance.tsv");

    let output = fgsheet(&[
        "validate",
        "--samples",
        arg(&files.samples),
        "--run-config",
        arg(&files.run_config),
        "--profiles",
        arg(&files.profiles),
        "--report",
        arg(&report),
        "--distances",
        arg(&distances),
        "--color-balance",
        arg(&balance),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Overall: PASS"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["report"]["passed"], serde_json::Value::Bool(true));
    assert_eq!(json["samples"][0]["resolved_override_cycles"], "Y151-I8-I8-Y151");
    assert_eq!(json["samples"][0]["index_i5_reverse_complement"], "AACCGGTT");

    let distances = fs::read_to_string(&distances).unwrap();
    // header + one pair for each of i7_i5, i7 and i5
    assert_eq!(distances.lines().count(), 4);
    assert!(distances.starts_with("lane\tkind\tsample_a\tsample_b\tmismatches"));

    let balance = fs::read_to_string(&balance).unwrap();
    // header + 8 cycles for each of i7 and i5
    assert_eq!(balance.lines().count(), 17);
}

#[test]
fn test_validate_fails_on_errors() {
    let rows = vec![
        row("Sample1", "1", "ACGTACGT", "", "BCLConvert", PATTERN),
        row("Sample2", "3", "ACGTACGT", "", "BCLConvert", PATTERN),
    ];
    let files = SheetFiles::new(&rows, &run_config_json([151, 8, 8, 151], &[1, 2]));
    let output = fgsheet(&[
        "validate",
        "-s",
        arg(&files.samples),
        "-r",
        arg(&files.run_config),
        "-p",
        arg(&files.profiles),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lanes_in_range"), "{stderr}");
    assert!(stderr.contains("Validation failed with 1 error(s)"), "{stderr}");
}

#[test]
fn test_validate_rejects_short_sample_ids_by_default() {
    let rows = vec![
        row("S1", "1", "ACGTACGT", "AACCGGTT", "BCLConvert", PATTERN),
        row("Sample2", "1", "TGCATGCA", "CCGGTTAA", "BCLConvert", PATTERN),
    ];
    let files = SheetFiles::new(&rows, &run_config_json([151, 8, 8, 151], &[1]));
    let args = [
        "validate",
        "-s",
        arg(&files.samples),
        "-r",
        arg(&files.run_config),
        "-p",
        arg(&files.profiles),
    ];

    let output = fgsheet(&args);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Sample_ID 'S1' is shorter than 5"), "{stderr}");

    let mut relaxed = args.to_vec();
    relaxed.extend(["--min-sample-id-length", "2"]);
    let output = fgsheet(&relaxed);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn test_validate_missing_input() {
    let files = clean_files();
    let missing = files.output("missing.csv");
    let output =
        fgsheet(&["validate", "-s", arg(&missing), "-r", arg(&files.run_config)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Sample table"));
}

#[test]
fn test_validate_rejects_bad_threshold() {
    let files = clean_files();
    let output = fgsheet(&[
        "validate",
        "-s",
        arg(&files.samples),
        "-r",
        arg(&files.run_config),
        "--min-green-fraction",
        "1.5",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("min-green-fraction"));
}
