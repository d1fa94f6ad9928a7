//! Run-level configuration: read cycles, lanes, i5 orientation and dye chemistry.
//!
//! A [`RunConfiguration`] is committed once per run setup and treated as immutable
//! for the duration of a validation pass.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{FgsheetError, Result};
use crate::flowcell::{known_flowcells, lanes_for_flowcell};
use crate::validation::validate_positive;

/// One of the four read segments of a dual-indexed paired-end run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadSegment {
    Read1,
    Index1,
    Index2,
    Read2,
}

impl ReadSegment {
    /// All segments in sequencing order.
    pub const ALL: [ReadSegment; 4] =
        [ReadSegment::Read1, ReadSegment::Index1, ReadSegment::Index2, ReadSegment::Read2];

    /// True for the two index segments.
    #[must_use]
    pub fn is_index(self) -> bool {
        matches!(self, ReadSegment::Index1 | ReadSegment::Index2)
    }

    /// Display label, e.g. `Index1`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ReadSegment::Read1 => "Read1",
            ReadSegment::Index1 => "Index1",
            ReadSegment::Index2 => "Index2",
            ReadSegment::Read2 => "Read2",
        }
    }
}

impl fmt::Display for ReadSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configured number of cycles for each read segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadCycles {
    pub read1: u32,
    pub index1: u32,
    pub index2: u32,
    pub read2: u32,
}

impl ReadCycles {
    #[must_use]
    pub fn new(read1: u32, index1: u32, index2: u32, read2: u32) -> Self {
        Self { read1, index1, index2, read2 }
    }

    /// Cycles configured for `segment`.
    #[must_use]
    pub fn for_segment(&self, segment: ReadSegment) -> u32 {
        match segment {
            ReadSegment::Read1 => self.read1,
            ReadSegment::Index1 => self.index1,
            ReadSegment::Index2 => self.index2,
            ReadSegment::Read2 => self.read2,
        }
    }

    /// Checks that every segment has a positive number of cycles.
    ///
    /// # Errors
    /// Returns an error naming the first segment with zero cycles.
    pub fn validate(&self) -> Result<()> {
        for segment in ReadSegment::ALL {
            validate_positive(self.for_segment(segment), &format!("{segment} cycles"))?;
        }
        Ok(())
    }
}

/// Parses `R1,I1,I2,R2`, e.g. `151,10,10,151`.
impl FromStr for ReadCycles {
    type Err = FgsheetError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| FgsheetError::InvalidParameter {
            parameter: "cycles".to_string(),
            reason,
        };
        let values = s
            .split(',')
            .map(|v| v.trim().parse::<u32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| invalid(format!("'{s}' is not a list of integers: {e}")))?;
        match values.as_slice() {
            &[read1, index1, index2, read2] => Ok(Self::new(read1, index1, index2, read2)),
            _ => Err(invalid(format!("expected 4 comma-separated values, got {}", values.len()))),
        }
    }
}

/// How the instrument reads the i5 index relative to the sequence given in the sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum I5Orientation {
    /// The i5 index is read as written (forward-strand workflow).
    #[default]
    Forward,
    /// The i5 index is read as its reverse complement.
    ReverseComplement,
}

/// Fraction of a base's signal that lands in each dye channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelWeights {
    pub blue: f64,
    pub green: f64,
    pub dark: f64,
}

impl ChannelWeights {
    #[must_use]
    pub const fn new(blue: f64, green: f64, dark: f64) -> Self {
        Self { blue, green, dark }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.blue + self.green + self.dark
    }
}

/// Mapping from each nucleotide to its dye-channel weights.
///
/// The default is the two-channel chemistry: A is blue, T is green, C is half blue and
/// half green, and G is dark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorChemistry {
    pub a: ChannelWeights,
    pub c: ChannelWeights,
    pub g: ChannelWeights,
    pub t: ChannelWeights,
}

impl Default for ColorChemistry {
    fn default() -> Self {
        Self {
            a: ChannelWeights::new(1.0, 0.0, 0.0),
            c: ChannelWeights::new(0.5, 0.5, 0.0),
            g: ChannelWeights::new(0.0, 0.0, 1.0),
            t: ChannelWeights::new(0.0, 1.0, 0.0),
        }
    }
}

impl ColorChemistry {
    /// Weights for `base`, or `None` for anything other than an uppercase A/C/G/T.
    #[must_use]
    pub fn weights(&self, base: u8) -> Option<&ChannelWeights> {
        match base {
            b'A' => Some(&self.a),
            b'C' => Some(&self.c),
            b'G' => Some(&self.g),
            b'T' => Some(&self.t),
            _ => None,
        }
    }

    /// Each base's weights must be non-negative and sum to 1.
    ///
    /// # Errors
    /// Returns an error naming the first offending base.
    pub fn validate(&self) -> Result<()> {
        for (base, weights) in [('A', &self.a), ('C', &self.c), ('G', &self.g), ('T', &self.t)] {
            let non_negative = weights.blue >= 0.0 && weights.green >= 0.0 && weights.dark >= 0.0;
            if !non_negative || (weights.total() - 1.0).abs() > 1e-6 {
                return Err(FgsheetError::InvalidRunConfiguration {
                    reason: format!(
                        "channel weights for {base} must be non-negative and sum to 1, got {weights:?}"
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Immutable per-run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfiguration {
    pub run_name: Option<String>,
    pub instrument: Option<String>,
    pub flowcell: Option<String>,
    pub cycles: ReadCycles,
    pub allowed_lanes: BTreeSet<u32>,
    pub i5_orientation: I5Orientation,
    pub chemistry: ColorChemistry,
}

/// On-disk JSON form of a run configuration; `allowed_lanes` may be left to the flowcell.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RunConfigurationDocument {
    run_name: Option<String>,
    instrument: Option<String>,
    flowcell: Option<String>,
    cycles: ReadCycles,
    allowed_lanes: Option<BTreeSet<u32>>,
    #[serde(default)]
    i5_orientation: I5Orientation,
    #[serde(default)]
    chemistry: ColorChemistry,
}

impl RunConfiguration {
    /// Creates a configuration with forward i5 orientation and the default chemistry.
    #[must_use]
    pub fn new(cycles: ReadCycles, allowed_lanes: impl IntoIterator<Item = u32>) -> Self {
        Self {
            run_name: None,
            instrument: None,
            flowcell: None,
            cycles,
            allowed_lanes: allowed_lanes.into_iter().collect(),
            i5_orientation: I5Orientation::default(),
            chemistry: ColorChemistry::default(),
        }
    }

    #[must_use]
    pub fn with_i5_orientation(mut self, orientation: I5Orientation) -> Self {
        self.i5_orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_chemistry(mut self, chemistry: ColorChemistry) -> Self {
        self.chemistry = chemistry;
        self
    }

    #[must_use]
    pub fn with_instrument(mut self, instrument: &str, flowcell: &str) -> Self {
        self.instrument = Some(instrument.to_string());
        self.flowcell = Some(flowcell.to_string());
        self
    }

    /// Checks cycles, lanes and chemistry.
    ///
    /// # Errors
    /// Returns an error describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.cycles.validate()?;
        if self.allowed_lanes.is_empty() {
            return Err(FgsheetError::InvalidRunConfiguration {
                reason: "no allowed lanes".to_string(),
            });
        }
        if self.allowed_lanes.contains(&0) {
            return Err(FgsheetError::InvalidRunConfiguration {
                reason: "lane numbers start at 1".to_string(),
            });
        }
        self.chemistry.validate()
    }

    /// Reads and validates a JSON run configuration.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or fails validation.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let invalid = |reason: String| FgsheetError::InvalidFileFormat {
            file_type: "run configuration".to_string(),
            path: path.display().to_string(),
            reason,
        };
        let text = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let document: RunConfigurationDocument =
            serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))?;
        Self::from_document(document)
    }

    /// Parses and validates a JSON run configuration held in memory.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: RunConfigurationDocument =
            serde_json::from_str(json).map_err(|e| FgsheetError::InvalidRunConfiguration {
                reason: e.to_string(),
            })?;
        Self::from_document(document)
    }

    fn from_document(document: RunConfigurationDocument) -> Result<Self> {
        let allowed_lanes = match document.allowed_lanes {
            Some(lanes) => lanes,
            None => {
                let lanes = match (&document.instrument, &document.flowcell) {
                    (Some(instrument), Some(flowcell)) => lanes_for_flowcell(instrument, flowcell),
                    _ => None,
                };
                let lanes = lanes.ok_or_else(|| {
                    let known = document
                        .instrument
                        .as_deref()
                        .map(known_flowcells)
                        .filter(|known| !known.is_empty())
                        .map_or_else(String::new, |known| {
                            format!("; known flowcells: {}", known.join(", "))
                        });
                    FgsheetError::InvalidRunConfiguration {
                        reason: format!(
                            "allowed_lanes not given and no lane count is known for instrument \
                             {:?} with flowcell {:?}{known}",
                            document.instrument, document.flowcell
                        ),
                    }
                })?;
                (1..=lanes).collect()
            }
        };

        let config = Self {
            run_name: document.run_name,
            instrument: document.instrument,
            flowcell: document.flowcell,
            cycles: document.cycles,
            allowed_lanes,
            i5_orientation: document.i5_orientation,
            chemistry: document.chemistry,
        };
        config.validate()?;
        Ok(config)
    }
}
