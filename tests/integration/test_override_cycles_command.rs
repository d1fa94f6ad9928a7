//! Tests of `fgsheet override-cycles` run as a subprocess.

use rstest::rstest;

use crate::helpers::fgsheet;

#[rstest]
#[case("Y{r}-I8-I8-Y{r}", "151,8,8,151", "Y151-I8-I8-Y151")]
#[case("U7Y{r}-I{i}-I8N{i}-Y{r}", "151,10,10,151", "U7Y144-I10-I8N2-Y151")]
#[case("N1Y{r}-I{i}-N{i}-Y100N{r}", "101,6,8,150", "N1Y100-I6-N8-Y100N50")]
fn test_resolves_pattern(#[case] pattern: &str, #[case] cycles: &str, #[case] expected: &str) {
    let output = fgsheet(&["override-cycles", "--pattern", pattern, "--cycles", cycles]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), expected);
}

#[rstest]
#[case("Y10{r}-I{i}-I{i}-Y151", "151,8,8,151", "Y10{r}")]
#[case("Y200Y{r}-I{i}-I{i}-Y{r}", "151,8,8,151", "leave nothing")]
#[case("Y{r}-I{i}-Y{r}", "151,8,8,151", "expected 4 dash-separated segments")]
fn test_rejects_pattern(#[case] pattern: &str, #[case] cycles: &str, #[case] fragment: &str) {
    let output = fgsheet(&["override-cycles", "-p", pattern, "-c", cycles]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(fragment), "{stderr}");
}

#[test]
fn test_rejects_malformed_cycles() {
    let output = fgsheet(&["override-cycles", "-p", "Y{r}-I{i}-I{i}-Y{r}", "-c", "151,8"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("expected 4 comma-separated values"));
}
