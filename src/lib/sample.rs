//! The sample table: one [`SampleRecord`] per row of the sample sheet.
//!
//! Type coercion happens once, when a table is ingested. Cells that cannot be coerced
//! are recorded as [`IngestIssue`]s on the table (and reported by the field-format
//! check) instead of aborting ingestion, so a malformed sheet still validates to a
//! list of results. Empty cells filled with a default are recorded too, as warnings.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::Read;
use std::path::Path;

use fgsheet_dna::reverse_complement;
use serde::{Deserialize, Serialize};

use crate::errors::{FgsheetError, Result};
use crate::results::Severity;
use crate::run_config::I5Orientation;

pub const SAMPLE_ID: &str = "Sample_ID";
pub const LANE: &str = "Lane";
pub const INDEX_I7: &str = "IndexI7";
pub const INDEX_I5: &str = "IndexI5";
pub const APPLICATION_PROFILE: &str = "ApplicationProfile";
pub const OVERRIDE_CYCLES_PATTERN: &str = "OverrideCyclesPattern";
pub const BARCODE_MISMATCHES_INDEX1: &str = "BarcodeMismatchesIndex1";
pub const BARCODE_MISMATCHES_INDEX2: &str = "BarcodeMismatchesIndex2";
pub const ADAPTER_READ1: &str = "AdapterRead1";
pub const ADAPTER_READ2: &str = "AdapterRead2";
pub const PROPORTION: &str = "Proportion";

/// Columns every sample sheet must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    SAMPLE_ID,
    LANE,
    INDEX_I7,
    APPLICATION_PROFILE,
    OVERRIDE_CYCLES_PATTERN,
    BARCODE_MISMATCHES_INDEX1,
    BARCODE_MISMATCHES_INDEX2,
];

/// Columns a sample sheet may carry; anything outside both lists is a schema error.
pub const OPTIONAL_COLUMNS: [&str; 4] = [INDEX_I5, ADAPTER_READ1, ADAPTER_READ2, PROPORTION];

/// Barcode mismatches allowed when the cell is left empty.
pub const DEFAULT_BARCODE_MISMATCHES: i64 = 1;

/// One row of the sample table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub sample_id: String,
    pub lanes: BTreeSet<u32>,
    pub index_i7: String,
    pub index_i5: Option<String>,
    pub application_profiles: BTreeSet<String>,
    pub override_cycles_pattern: String,
    pub barcode_mismatches_index1: i64,
    pub barcode_mismatches_index2: i64,
    pub adapter_read1: Option<String>,
    pub adapter_read2: Option<String>,
    /// Relative pool concentration, used to weight the sample in color balance.
    pub proportion: u32,
}

impl SampleRecord {
    /// Creates a record on the given lanes with no i5, profiles or adapters.
    #[must_use]
    pub fn new(
        sample_id: &str,
        lanes: impl IntoIterator<Item = u32>,
        index_i7: &str,
        override_cycles_pattern: &str,
    ) -> Self {
        Self {
            sample_id: sample_id.to_string(),
            lanes: lanes.into_iter().collect(),
            index_i7: index_i7.to_string(),
            index_i5: None,
            application_profiles: BTreeSet::new(),
            override_cycles_pattern: override_cycles_pattern.to_string(),
            barcode_mismatches_index1: DEFAULT_BARCODE_MISMATCHES,
            barcode_mismatches_index2: DEFAULT_BARCODE_MISMATCHES,
            adapter_read1: None,
            adapter_read2: None,
            proportion: 1,
        }
    }

    #[must_use]
    pub fn with_i5(mut self, index_i5: &str) -> Self {
        self.index_i5 = Some(index_i5.to_string());
        self
    }

    #[must_use]
    pub fn with_profiles<'a>(mut self, profiles: impl IntoIterator<Item = &'a str>) -> Self {
        self.application_profiles = profiles.into_iter().map(str::to_string).collect();
        self
    }

    #[must_use]
    pub fn with_proportion(mut self, proportion: u32) -> Self {
        self.proportion = proportion;
        self
    }

    /// Reverse complement of the i5 index, if there is one.
    #[must_use]
    pub fn index_i5_reverse_complement(&self) -> Option<String> {
        self.index_i5.as_deref().map(reverse_complement)
    }

    /// The i5 index as the instrument reads it under `orientation`.
    #[must_use]
    pub fn effective_i5(&self, orientation: I5Orientation) -> Option<String> {
        match orientation {
            I5Orientation::Forward => self.index_i5.clone(),
            I5Orientation::ReverseComplement => self.index_i5_reverse_complement(),
        }
    }

    /// True if the sample is assigned to `lane`.
    #[must_use]
    pub fn is_on_lane(&self, lane: u32) -> bool {
        self.lanes.contains(&lane)
    }
}

/// A cell that could not be coerced to its column's type during ingestion
/// ([`Severity::Error`]), or an empty cell that was given a default ([`Severity::Warning`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestIssue {
    /// 1-based data row
    pub row: usize,
    pub column: String,
    pub value: String,
    pub reason: String,
    pub severity: Severity,
}

impl fmt::Display for IngestIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "row {} {}: {}", self.row, self.column, self.reason)
        } else {
            write!(f, "row {} {} '{}': {}", self.row, self.column, self.value, self.reason)
        }
    }
}

/// The full sample table, as seen by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleTable {
    /// Column names as they appeared in the source, used by the strict schema check.
    pub columns: Vec<String>,
    pub records: Vec<SampleRecord>,
    pub issues: Vec<IngestIssue>,
}

impl SampleTable {
    /// Builds a table from typed records, declaring every known column.
    #[must_use]
    pub fn new(records: Vec<SampleRecord>) -> Self {
        let columns =
            REQUIRED_COLUMNS.iter().chain(OPTIONAL_COLUMNS.iter()).map(|c| (*c).to_string()).collect();
        Self { columns, records, issues: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every lane used by at least one sample.
    #[must_use]
    pub fn lanes(&self) -> BTreeSet<u32> {
        self.records.iter().flat_map(|r| r.lanes.iter().copied()).collect()
    }

    /// Indices of the records assigned to `lane`, in table order.
    #[must_use]
    pub fn rows_on_lane(&self, lane: u32) -> Vec<usize> {
        self.records.iter().enumerate().filter(|(_, r)| r.is_on_lane(lane)).map(|(i, _)| i).collect()
    }

    /// One `(row index, lane)` pair per lane of every sample.
    #[must_use]
    pub fn explode_lanes(&self) -> Vec<(usize, u32)> {
        self.records
            .iter()
            .enumerate()
            .flat_map(|(i, r)| r.lanes.iter().map(move |&lane| (i, lane)))
            .collect()
    }

    /// Reads a sample sheet, choosing the delimiter from the extension (`.tsv`/`.txt` are
    /// tab-delimited, anything else comma-delimited).
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or is not well-formed delimited text.
    pub fn from_delimited<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some("tsv" | "txt") => b'\t',
            _ => b',',
        };
        let file = std::fs::File::open(path).map_err(|e| FgsheetError::InvalidFileFormat {
            file_type: "sample sheet".to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_reader(file, delimiter).map_err(|e| match e {
            FgsheetError::InvalidFileFormat { file_type, reason, .. } => {
                FgsheetError::InvalidFileFormat {
                    file_type,
                    path: path.display().to_string(),
                    reason,
                }
            }
            other => other,
        })
    }

    /// Reads a headered sample sheet from any reader.
    ///
    /// # Errors
    /// Returns an error if the input is not well-formed delimited text.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let malformed = |e: csv::Error| FgsheetError::InvalidFileFormat {
            file_type: "sample sheet".to_string(),
            path: "<reader>".to_string(),
            reason: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let columns: Vec<String> =
            reader.headers().map_err(malformed)?.iter().map(str::to_string).collect();
        let positions: BTreeMap<&str, usize> =
            columns.iter().enumerate().map(|(i, c)| (c.as_str(), i)).collect();

        let mut records = Vec::new();
        let mut issues = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row.map_err(malformed)?;
            let cell = |column: &str| cell_value(&row, &positions, column);
            let present = |column: &str| positions.contains_key(column);
            let mut parser = RowParser { row: i + 1, issues: &mut issues };

            let index_i5 = non_empty(cell(INDEX_I5));
            records.push(SampleRecord {
                sample_id: cell(SAMPLE_ID).to_string(),
                lanes: parser.lanes(cell(LANE)),
                index_i7: cell(INDEX_I7).to_string(),
                index_i5,
                application_profiles: split_list(cell(APPLICATION_PROFILE))
                    .map(str::to_string)
                    .collect(),
                override_cycles_pattern: cell(OVERRIDE_CYCLES_PATTERN).to_string(),
                barcode_mismatches_index1: parser.barcode_mismatches(
                    BARCODE_MISMATCHES_INDEX1,
                    present(BARCODE_MISMATCHES_INDEX1).then(|| cell(BARCODE_MISMATCHES_INDEX1)),
                ),
                barcode_mismatches_index2: parser.barcode_mismatches(
                    BARCODE_MISMATCHES_INDEX2,
                    present(BARCODE_MISMATCHES_INDEX2).then(|| cell(BARCODE_MISMATCHES_INDEX2)),
                ),
                adapter_read1: non_empty(cell(ADAPTER_READ1)),
                adapter_read2: non_empty(cell(ADAPTER_READ2)),
                proportion: parser.proportion(cell(PROPORTION)),
            });
        }

        Ok(Self { columns, records, issues })
    }
}

fn cell_value<'r>(
    row: &'r csv::StringRecord,
    positions: &BTreeMap<&str, usize>,
    column: &str,
) -> &'r str {
    positions.get(column).and_then(|&p| row.get(p)).unwrap_or("")
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() { None } else { Some(value.to_string()) }
}

/// Splits a list-valued cell such as `1,2`, `1;2` or `[1, 2]`.
fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split([',', ';'])
        .flat_map(str::split_whitespace)
        .map(|v| v.trim_matches(|c: char| c == '"' || c == '\''))
        .filter(|v| !v.is_empty())
}

/// Coerces the cells of one row, recording anything that does not parse.
struct RowParser<'a> {
    row: usize,
    issues: &'a mut Vec<IngestIssue>,
}

impl RowParser<'_> {
    fn push(&mut self, column: &str, value: &str, reason: String, severity: Severity) {
        self.issues.push(IngestIssue {
            row: self.row,
            column: column.to_string(),
            value: value.to_string(),
            reason,
            severity,
        });
    }

    fn issue(&mut self, column: &str, value: &str, reason: &str) {
        self.push(column, value, reason.to_string(), Severity::Error);
    }

    /// `value` is `None` when the column is absent; the schema check reports that.
    fn barcode_mismatches(&mut self, column: &str, value: Option<&str>) -> i64 {
        match value {
            Some("") => {
                self.push(
                    column,
                    "",
                    format!("empty, defaulted to {DEFAULT_BARCODE_MISMATCHES}"),
                    Severity::Warning,
                );
                DEFAULT_BARCODE_MISMATCHES
            }
            Some(value) => self.integer(column, value).unwrap_or(DEFAULT_BARCODE_MISMATCHES),
            None => DEFAULT_BARCODE_MISMATCHES,
        }
    }

    fn lanes(&mut self, value: &str) -> BTreeSet<u32> {
        let mut lanes = BTreeSet::new();
        for token in split_list(value) {
            match token.parse::<u32>() {
                Ok(lane) => {
                    lanes.insert(lane);
                }
                Err(_) => self.issue(LANE, value, "lane must be a list of integers"),
            }
        }
        lanes
    }

    fn integer(&mut self, column: &str, value: &str) -> Option<i64> {
        if value.is_empty() {
            return None;
        }
        match value.parse::<i64>() {
            Ok(v) => Some(v),
            Err(_) => {
                self.issue(column, value, "must be an integer");
                None
            }
        }
    }

    fn proportion(&mut self, value: &str) -> u32 {
        if value.is_empty() {
            return 1;
        }
        value.parse::<u32>().unwrap_or_else(|_| {
            self.issue(PROPORTION, value, "must be a non-negative integer");
            1
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::Builder;

    const HEADER: &str = "Sample_ID,Lane,IndexI7,IndexI5,ApplicationProfile,OverrideCyclesPattern,\
                          BarcodeMismatchesIndex1,BarcodeMismatchesIndex2";

    fn parse(body: &str) -> SampleTable {
        let text = format!("{HEADER}\n{body}");
        SampleTable::from_reader(text.as_bytes(), b',').unwrap()
    }

    #[test]
    fn test_from_reader_basic() {
        let table = parse(
            "S1,1,ACGTACGT,TTGGCCAA,BCLConvert,Y{r}-I{i}-I{i}-Y{r},1,0\n\
             S2,\"1,2\",GGGGAAAA,,BCLConvert;DragenGermline,Y{r}-I{i}-I{i}-Y{r},,",
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns.len(), 8);

        let s1 = &table.records[0];
        assert_eq!(s1.sample_id, "S1");
        assert_eq!(s1.lanes, BTreeSet::from([1]));
        assert_eq!(s1.index_i5.as_deref(), Some("TTGGCCAA"));
        assert_eq!(s1.barcode_mismatches_index2, 0);
        assert_eq!(s1.proportion, 1);

        let s2 = &table.records[1];
        assert_eq!(s2.lanes, BTreeSet::from([1, 2]));
        assert!(s2.index_i5.is_none());
        assert_eq!(s2.application_profiles.len(), 2);
        assert_eq!(s2.barcode_mismatches_index1, DEFAULT_BARCODE_MISMATCHES);
        assert_eq!(s2.barcode_mismatches_index2, DEFAULT_BARCODE_MISMATCHES);
    }

    #[test]
    fn test_empty_barcode_mismatches_are_recorded_as_warnings() {
        let table = parse("S1,1,ACGT,,P,Y{r}-I{i}-I{i}-Y{r},,2");
        assert_eq!(table.records[0].barcode_mismatches_index1, DEFAULT_BARCODE_MISMATCHES);
        assert_eq!(table.issues.len(), 1);
        let issue = &table.issues[0];
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.column, BARCODE_MISMATCHES_INDEX1);
        assert_eq!(issue.to_string(), "row 1 BarcodeMismatchesIndex1: empty, defaulted to 1");
    }

    #[rstest]
    #[case("1", &[1])]
    #[case("1,2", &[1, 2])]
    #[case("2;1", &[1, 2])]
    #[case("[1, 3]", &[1, 3])]
    #[case("1 2 2", &[1, 2])]
    #[case("", &[])]
    fn test_lane_parsing(#[case] cell: &str, #[case] expected: &[u32]) {
        let mut issues = Vec::new();
        let lanes = RowParser { row: 1, issues: &mut issues }.lanes(cell);
        assert_eq!(lanes, expected.iter().copied().collect());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_uncoercible_cells_become_issues() {
        let table = parse("S1,one,ACGT,,P,Y{r}-I{i}-I{i}-Y{r},x,2");
        assert_eq!(table.len(), 1);
        assert!(table.records[0].lanes.is_empty());
        assert_eq!(table.records[0].barcode_mismatches_index1, DEFAULT_BARCODE_MISMATCHES);
        assert_eq!(table.issues.len(), 2);
        assert_eq!(table.issues[0].column, LANE);
        assert_eq!(table.issues[0].row, 1);
        assert_eq!(table.issues[1].column, BARCODE_MISMATCHES_INDEX1);
        assert!(table.issues.iter().all(|i| i.severity == Severity::Error));
        assert_eq!(
            table.issues[1].to_string(),
            "row 1 BarcodeMismatchesIndex1 'x': must be an integer"
        );
    }

    #[test]
    fn test_from_delimited_tsv() {
        let mut file = Builder::new().suffix(".tsv").tempfile().unwrap();
        writeln!(file, "Sample_ID\tLane\tIndexI7\tProportion").unwrap();
        writeln!(file, "S1\t1\tACGTACGT\t3").unwrap();
        let table = SampleTable::from_delimited(file.path()).unwrap();
        assert_eq!(table.records[0].proportion, 3);
        assert_eq!(table.columns, vec!["Sample_ID", "Lane", "IndexI7", "Proportion"]);
    }

    #[test]
    fn test_from_delimited_missing_file() {
        let err = SampleTable::from_delimited("/nonexistent/samples.csv").unwrap_err().to_string();
        assert!(err.contains("Invalid sample sheet file '/nonexistent/samples.csv'"));
    }

    #[test]
    fn test_explode_lanes_and_rows_on_lane() {
        let table = SampleTable::new(vec![
            SampleRecord::new("A", [1, 2], "ACGT", "Y4-I4-I4-Y4"),
            SampleRecord::new("B", [2], "TTTT", "Y4-I4-I4-Y4"),
        ]);
        assert_eq!(table.explode_lanes(), vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(table.rows_on_lane(2), vec![0, 1]);
        assert_eq!(table.rows_on_lane(3), Vec::<usize>::new());
        assert_eq!(table.lanes(), BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_effective_i5() {
        let record = SampleRecord::new("A", [1], "ACGT", "Y4-I4-I4-Y4").with_i5("AACCGGTA");
        assert_eq!(record.effective_i5(I5Orientation::Forward).as_deref(), Some("AACCGGTA"));
        assert_eq!(
            record.effective_i5(I5Orientation::ReverseComplement).as_deref(),
            Some("TACCGGTT")
        );
        let no_i5 = SampleRecord::new("B", [1], "ACGT", "Y4-I4-I4-Y4");
        assert!(no_i5.effective_i5(I5Orientation::ReverseComplement).is_none());
    }
}
