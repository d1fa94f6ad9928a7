//! Validate a sample sheet against a run configuration.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use log::{info, warn};

use fgsheet_lib::options::ValidationContext;
use fgsheet_lib::orchestrator::ValidationOrchestrator;
use fgsheet_lib::results::Severity;
use fgsheet_lib::snapshot::SheetSnapshot;
use fgsheet_lib::source::SampleSheetSource;
use fgsheet_lib::tables::{write_color_balance, write_index_distances};

use crate::commands::command::Command;
use crate::commands::common::{SheetInputOptions, ThresholdOptions};

/// Validates a sample sheet and writes the derived data.
#[derive(Debug, Parser)]
#[command(
    name = "validate",
    about = "\x1b[38;5;72m[VALIDATION]\x1b[0m     \x1b[36mValidate a sample sheet against a run configuration\x1b[0m",
    long_about = r#"
Validate a sample sheet against a run configuration.

Every consistency check runs, whatever the others find, and every result is logged.
Index distance matrices and per-cycle color balance are computed regardless of the
outcome and can be written as TSV tables. The JSON report holds the run configuration,
every sample with its resolved override cycles, and the full validation report.

The command exits with a non-zero status if any check reports an ERROR.

Example usage:
  fgsheet validate -s samples.tsv -r run.json -p profiles.json --report sheet.json
  fgsheet validate -s samples.csv -r run.json --distances d.tsv --color-balance c.tsv
"#
)]
pub struct Validate {
    #[command(flatten)]
    pub input: SheetInputOptions,

    #[command(flatten)]
    pub thresholds: ThresholdOptions,

    /// Write the validated sheet and report as JSON
    #[arg(long = "report")]
    pub report: Option<PathBuf>,

    /// Write pairwise index distances as TSV
    #[arg(long = "distances")]
    pub distances: Option<PathBuf>,

    /// Write per-cycle color balance as TSV
    #[arg(long = "color-balance")]
    pub color_balance: Option<PathBuf>,
}

impl Command for Validate {
    fn execute(&self, command_line: &str) -> Result<()> {
        self.input.validate()?;
        let options = self.thresholds.to_options()?;
        let min_green = options.min_green_fraction;
        let context = ValidationContext::new(self.input.catalog()?, options);

        info!("Starting Validate");
        info!("Command line: {command_line}");
        info!("Samples: {}", self.input.samples.display());
        info!("Run configuration: {}", self.input.run_config.display());
        info!("Application profiles: {}", context.catalog.len());

        let snapshot = self.input.source().snapshot();
        let mut orchestrator = ValidationOrchestrator::new(&context);
        let report = orchestrator.validate_outcome(snapshot.as_ref());

        if let Some(path) = &self.distances {
            write_index_distances(path, &report)?;
            info!("Wrote index distances to {}", path.display());
        }
        if let Some(path) = &self.color_balance {
            write_color_balance(path, &report, min_green)?;
            info!("Wrote color balance to {}", path.display());
        }
        if let Some(path) = &self.report {
            match &snapshot {
                Ok(snapshot) => {
                    SheetSnapshot::new(&snapshot.samples, &snapshot.run, report.clone())
                        .write_json(path)?;
                    info!("Wrote report to {}", path.display());
                }
                Err(_) => warn!("Sample sheet could not be read; no report written"),
            }
        }

        if !report.passed {
            bail!("Validation failed with {} error(s)", report.count(Severity::Error));
        }
        Ok(())
    }
}
