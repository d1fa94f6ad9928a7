//! Tunable thresholds for a validation pass, and the context validators share.

use serde::{Deserialize, Serialize};

use crate::application::ApplicationCatalog;
use crate::errors::Result;
use crate::padding::PaddingLength;
use crate::results::MAX_LISTED_ITEMS;
use crate::validation::{validate_at_most, validate_fraction, validate_positive};

/// Green-channel fraction below which a cycle is flagged as dye-imbalanced.
pub const DEFAULT_MIN_GREEN_FRACTION: f64 = 0.10;

/// Shortest Sample_ID accepted by the field-format check.
pub const DEFAULT_MIN_SAMPLE_ID_LENGTH: usize = 5;

/// Longest fixed padding length; no index kit reads more index cycles than this.
pub const MAX_FIXED_INDEX_LENGTH: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Target length of padded index tables.
    pub padding: PaddingLength,
    pub min_green_fraction: f64,
    /// Most offending items listed in one result message.
    pub max_listed: usize,
    pub min_sample_id_length: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            padding: PaddingLength::default(),
            min_green_fraction: DEFAULT_MIN_GREEN_FRACTION,
            max_listed: MAX_LISTED_ITEMS,
            min_sample_id_length: DEFAULT_MIN_SAMPLE_ID_LENGTH,
        }
    }
}

impl ValidationOptions {
    /// # Errors
    /// Returns an error if a threshold is out of range.
    pub fn validate(&self) -> Result<()> {
        validate_fraction(self.min_green_fraction, "min-green-fraction")?;
        validate_positive(self.max_listed, "max-listed")?;
        validate_positive(self.min_sample_id_length, "min-sample-id-length")?;
        if let PaddingLength::Fixed(length) = self.padding {
            validate_positive(length, "fixed-index-length")?;
            validate_at_most(length, MAX_FIXED_INDEX_LENGTH, "fixed-index-length")?;
        }
        Ok(())
    }
}

/// Everything a validation pass needs besides the sheet itself. Built once and passed
/// by reference.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    pub catalog: ApplicationCatalog,
    pub options: ValidationOptions,
}

impl ValidationContext {
    #[must_use]
    pub fn new(catalog: ApplicationCatalog, options: ValidationOptions) -> Self {
        Self { catalog, options }
    }
}
