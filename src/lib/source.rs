//! Where validation gets its inputs from.
//!
//! A validation pass never reads live, editable state. It asks a [`SampleSheetSource`]
//! for a [`Snapshot`]: an immutable copy of the sample table and the committed run
//! configuration, taken at one instant.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::errors::{FgsheetError, Result};
use crate::run_config::RunConfiguration;
use crate::sample::{SampleRecord, SampleTable};

/// An immutable view of a sample sheet, cheap to clone and share across threads.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub samples: Arc<SampleTable>,
    pub run: Arc<RunConfiguration>,
}

impl Snapshot {
    #[must_use]
    pub fn new(samples: SampleTable, run: RunConfiguration) -> Self {
        Self { samples: Arc::new(samples), run: Arc::new(run) }
    }
}

/// Anything validation can pull a snapshot from.
pub trait SampleSheetSource {
    /// # Errors
    /// Returns an error if the inputs cannot be read, or no run configuration exists.
    fn snapshot(&self) -> Result<Snapshot>;
}

impl SampleSheetSource for Snapshot {
    fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.clone())
    }
}

#[derive(Debug, Default)]
struct StoreState {
    samples: SampleTable,
    run: Option<Arc<RunConfiguration>>,
}

/// Editable in-memory sample sheet.
///
/// Edits take the write lock; [`SampleSheetSource::snapshot`] copies the table under the
/// read lock, so a snapshot never observes a half-applied edit and later edits never
/// reach a snapshot already taken.
#[derive(Debug, Default)]
pub struct SampleSheetStore {
    state: RwLock<StoreState>,
}

impl SampleSheetStore {
    #[must_use]
    pub fn new(samples: SampleTable) -> Self {
        Self { state: RwLock::new(StoreState { samples, run: None }) }
    }

    /// Replaces the whole table.
    pub fn replace_samples(&self, samples: SampleTable) {
        self.state.write().samples = samples;
    }

    pub fn push_sample(&self, record: SampleRecord) {
        self.state.write().samples.records.push(record);
    }

    /// Applies `edit` to the record at `row`. Returns false if there is no such row.
    pub fn edit_sample<F: FnOnce(&mut SampleRecord)>(&self, row: usize, edit: F) -> bool {
        match self.state.write().samples.records.get_mut(row) {
            Some(record) => {
                edit(record);
                true
            }
            None => false,
        }
    }

    /// Validates and commits a run configuration, replacing any earlier one.
    ///
    /// # Errors
    /// Returns an error, leaving the committed configuration unchanged, if `run` is invalid.
    pub fn commit_run_configuration(&self, run: RunConfiguration) -> Result<()> {
        run.validate()?;
        self.state.write().run = Some(Arc::new(run));
        Ok(())
    }

    #[must_use]
    pub fn run_configuration(&self) -> Option<Arc<RunConfiguration>> {
        self.state.read().run.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().samples.is_empty()
    }
}

impl SampleSheetSource for SampleSheetStore {
    fn snapshot(&self) -> Result<Snapshot> {
        let state = self.state.read();
        let run = state.run.clone().ok_or_else(|| FgsheetError::InvalidRunConfiguration {
            reason: "no run configuration has been committed".to_string(),
        })?;
        Ok(Snapshot { samples: Arc::new(state.samples.clone()), run })
    }
}

/// A sample sheet and run configuration on disk, read afresh for every snapshot.
#[derive(Debug, Clone)]
pub struct DelimitedSampleSheet {
    samples: PathBuf,
    run_config: PathBuf,
}

impl DelimitedSampleSheet {
    #[must_use]
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(samples: P, run_config: Q) -> Self {
        Self { samples: samples.as_ref().to_path_buf(), run_config: run_config.as_ref().to_path_buf() }
    }
}

impl SampleSheetSource for DelimitedSampleSheet {
    fn snapshot(&self) -> Result<Snapshot> {
        let samples = SampleTable::from_delimited(&self.samples)?;
        let run = RunConfiguration::from_path(&self.run_config)?;
        Ok(Snapshot::new(samples, run))
    }
}
