//! Writes sample sheets, run configurations and application profiles to a temporary
//! directory.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub const HEADER: &str = "Sample_ID,Lane,IndexI7,IndexI5,ApplicationProfile,\
                          OverrideCyclesPattern,BarcodeMismatchesIndex1,BarcodeMismatchesIndex2";

pub const PATTERN: &str = "Y{r}-I{i}-I{i}-Y{r}";

/// One row of a comma-delimited sample table.
#[must_use]
pub fn row(sample_id: &str, lanes: &str, i7: &str, i5: &str, profiles: &str, pattern: &str) -> String {
    format!("{sample_id},\"{lanes}\",{i7},{i5},{profiles},{pattern},1,1")
}

/// Run configuration JSON with the given cycles and lanes.
#[must_use]
pub fn run_config_json(cycles: [u32; 4], lanes: &[u32]) -> String {
    let lanes = lanes.iter().map(u32::to_string).collect::<Vec<_>>().join(", ");
    format!(
        r#"{{
  "run_name": "integration",
  "cycles": {{ "read1": {}, "index1": {}, "index2": {}, "read2": {} }},
  "allowed_lanes": [{lanes}]
}}"#,
        cycles[0], cycles[1], cycles[2], cycles[3]
    )
}

pub const PROFILES_JSON: &str = r#"[
  { "name": "BCLConvert", "application_type": "BCLConvert",
    "settings": { "AdapterBehavior": "trim", "CreateFastqForIndexReads": 0 } },
  { "name": "BCLConvertMask", "application_type": "BCLConvert",
    "settings": { "AdapterBehavior": "mask", "CreateFastqForIndexReads": 0 } },
  { "name": "DragenGermline", "application_type": "DragenGermline",
    "settings": { "ReferenceGenomeDir": "hg38" } }
]"#;

/// A sample sheet on disk.
pub struct SheetFiles {
    pub dir: TempDir,
    pub samples: PathBuf,
    pub run_config: PathBuf,
    pub profiles: PathBuf,
}

impl SheetFiles {
    /// Writes `rows` under [`HEADER`], the run configuration and [`PROFILES_JSON`].
    pub fn new(rows: &[String], run_config: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let samples = dir.path().join("samples.csv");
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        fs::write(&samples, text).expect("Failed to write samples");

        let run_path = dir.path().join("run.json");
        fs::write(&run_path, run_config).expect("Failed to write run configuration");

        let profiles = dir.path().join("profiles.json");
        fs::write(&profiles, PROFILES_JSON).expect("Failed to write profiles");

        Self { dir, samples, run_config: run_path, profiles }
    }

    /// A path for an output file inside the temporary directory.
    #[must_use]
    pub fn output(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Runs the compiled `fgsheet` binary.
pub fn fgsheet(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fgsheet"))
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .expect("Failed to run fgsheet")
}

/// Lossy path-to-str for command arguments.
#[must_use]
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}
