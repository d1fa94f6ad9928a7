//! Common CLI options shared across commands.
//!
//! This module provides shared argument structures that can be composed into
//! command structs using `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use fgsheet_lib::application::ApplicationCatalog;
use fgsheet_lib::options::{
    DEFAULT_MIN_GREEN_FRACTION, DEFAULT_MIN_SAMPLE_ID_LENGTH, ValidationOptions,
};
use fgsheet_lib::padding::PaddingLength;
use fgsheet_lib::results::MAX_LISTED_ITEMS;
use fgsheet_lib::source::DelimitedSampleSheet;
use fgsheet_lib::validation::validate_file_exists;

/// The files describing one sample sheet.
#[derive(Debug, Clone, Args)]
pub struct SheetInputOptions {
    /// Sample table, tab- or comma-delimited with a header row
    #[arg(short = 's', long = "samples")]
    pub samples: PathBuf,

    /// Run configuration JSON
    #[arg(short = 'r', long = "run-config")]
    pub run_config: PathBuf,

    /// Application profiles JSON; without it every referenced profile is unknown
    #[arg(short = 'p', long = "profiles")]
    pub profiles: Option<PathBuf>,
}

impl SheetInputOptions {
    /// Validates that every given input file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an input file does not exist.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_file_exists(&self.samples, "Sample table")?;
        validate_file_exists(&self.run_config, "Run configuration")?;
        if let Some(profiles) = &self.profiles {
            validate_file_exists(profiles, "Application profiles")?;
        }
        Ok(())
    }

    #[must_use]
    pub fn source(&self) -> DelimitedSampleSheet {
        DelimitedSampleSheet::new(&self.samples, &self.run_config)
    }

    /// Loads the application profiles, or an empty catalog if none were given.
    ///
    /// # Errors
    ///
    /// Returns an error if the profiles file cannot be parsed.
    pub fn catalog(&self) -> anyhow::Result<ApplicationCatalog> {
        match &self.profiles {
            Some(path) => Ok(ApplicationCatalog::from_path(path)?),
            None => Ok(ApplicationCatalog::default()),
        }
    }
}

/// Thresholds for a validation pass.
#[derive(Debug, Clone, Args)]
pub struct ThresholdOptions {
    /// Pad indexes to this length instead of the run's index cycles
    #[arg(long = "fixed-index-length")]
    pub fixed_index_length: Option<usize>,

    /// Warn when an index cycle's green-channel fraction is below this
    #[arg(long = "min-green-fraction", default_value_t = DEFAULT_MIN_GREEN_FRACTION)]
    pub min_green_fraction: f64,

    /// Most offending items listed in a single result
    #[arg(long = "max-listed", default_value_t = MAX_LISTED_ITEMS)]
    pub max_listed: usize,

    /// Shortest accepted Sample_ID
    #[arg(long = "min-sample-id-length", default_value_t = DEFAULT_MIN_SAMPLE_ID_LENGTH)]
    pub min_sample_id_length: usize,
}

impl ThresholdOptions {
    /// Builds and validates the library options.
    ///
    /// # Errors
    ///
    /// Returns an error if a threshold is out of range.
    pub fn to_options(&self) -> anyhow::Result<ValidationOptions> {
        let options = ValidationOptions {
            padding: self.fixed_index_length.map_or(PaddingLength::RunCycles, PaddingLength::Fixed),
            min_green_fraction: self.min_green_fraction,
            max_listed: self.max_listed,
            min_sample_id_length: self.min_sample_id_length,
        };
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> ThresholdOptions {
        ThresholdOptions {
            fixed_index_length: None,
            min_green_fraction: DEFAULT_MIN_GREEN_FRACTION,
            max_listed: MAX_LISTED_ITEMS,
            min_sample_id_length: DEFAULT_MIN_SAMPLE_ID_LENGTH,
        }
    }

    #[test]
    fn test_default_thresholds() {
        assert_eq!(thresholds().to_options().unwrap(), ValidationOptions::default());
    }

    #[test]
    fn test_fixed_index_length() {
        let options = ThresholdOptions { fixed_index_length: Some(12), ..thresholds() };
        assert_eq!(options.to_options().unwrap().padding, PaddingLength::Fixed(12));

        let options = ThresholdOptions { fixed_index_length: Some(0), ..thresholds() };
        assert!(options.to_options().is_err());

        let options = ThresholdOptions { fixed_index_length: Some(100), ..thresholds() };
        assert!(options.to_options().is_err());
    }

    #[test]
    fn test_missing_inputs() {
        let inputs = SheetInputOptions {
            samples: PathBuf::from("/nonexistent/samples.tsv"),
            run_config: PathBuf::from("/nonexistent/run.json"),
            profiles: None,
        };
        assert!(inputs.validate().is_err());
        assert!(inputs.catalog().unwrap().is_empty());
    }
}
