//! JSON export of a validated sample sheet.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::orchestrator::ValidationReport;
use crate::run_config::RunConfiguration;
use crate::sample::{SampleRecord, SampleTable};

/// A sample record together with the values derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedSample {
    #[serde(flatten)]
    pub record: SampleRecord,
    pub index_i5_reverse_complement: Option<String>,
    pub resolved_override_cycles: Option<String>,
}

/// Everything known about one sample sheet after a validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSnapshot {
    pub run_configuration: RunConfiguration,
    pub samples: Vec<ExportedSample>,
    pub report: ValidationReport,
}

impl SheetSnapshot {
    /// Joins the samples with the override cycles resolved in `report`, row for row.
    #[must_use]
    pub fn new(samples: &SampleTable, run: &RunConfiguration, report: ValidationReport) -> Self {
        let samples = samples
            .records
            .iter()
            .enumerate()
            .map(|(row, record)| ExportedSample {
                record: record.clone(),
                index_i5_reverse_complement: record.index_i5_reverse_complement(),
                resolved_override_cycles: report
                    .override_cycles
                    .get(row)
                    .and_then(|r| r.resolved.clone()),
            })
            .collect();
        Self { run_configuration: run.clone(), samples, report }
    }

    /// Writes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create snapshot: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
        writer.flush().with_context(|| format!("Failed to flush snapshot: {}", path.display()))?;
        Ok(())
    }
}
