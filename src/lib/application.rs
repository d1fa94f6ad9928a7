//! Application profiles: named bundles of processing settings referenced by samples.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{FgsheetError, Result};

/// A named bundle of settings for one application (e.g. `BCLConvert`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationProfile {
    pub name: String,
    pub application_type: String,
    #[serde(default)]
    pub settings: BTreeMap<String, Value>,
}

impl ApplicationProfile {
    #[must_use]
    pub fn new(name: &str, application_type: &str) -> Self {
        Self {
            name: name.to_string(),
            application_type: application_type.to_string(),
            settings: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_setting(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }
}

/// The catalog of profiles samples may reference, keyed by profile name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationCatalog {
    profiles: BTreeMap<String, ApplicationProfile>,
}

impl ApplicationCatalog {
    /// Builds a catalog; a later profile replaces an earlier one of the same name.
    #[must_use]
    pub fn new(profiles: impl IntoIterator<Item = ApplicationProfile>) -> Self {
        Self { profiles: profiles.into_iter().map(|p| (p.name.clone(), p)).collect() }
    }

    /// Reads a JSON array of profiles.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a JSON array of profiles,
    /// or if two profiles share a name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let invalid = |reason: String| FgsheetError::InvalidFileFormat {
            file_type: "application profiles".to_string(),
            path: path.display().to_string(),
            reason,
        };
        let text = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let profiles: Vec<ApplicationProfile> =
            serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))?;

        let mut catalog = Self::default();
        for profile in profiles {
            if catalog.profiles.contains_key(&profile.name) {
                return Err(invalid(format!("duplicate profile name '{}'", profile.name)));
            }
            catalog.profiles.insert(profile.name.clone(), profile);
        }
        Ok(catalog)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ApplicationProfile> {
        self.profiles.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Keys whose value differs between any two of `settings` (a key missing from some is a
/// difference), in sorted order.
#[must_use]
pub fn differing_keys<'a>(
    settings: impl IntoIterator<Item = &'a BTreeMap<String, Value>>,
) -> Vec<String> {
    let settings: Vec<_> = settings.into_iter().collect();
    let Some((first, rest)) = settings.split_first() else {
        return Vec::new();
    };

    let mut keys: Vec<&String> = settings.iter().flat_map(|s| s.keys()).collect();
    keys.sort();
    keys.dedup();
    keys.into_iter()
        .filter(|key| rest.iter().any(|other| other.get(*key) != first.get(*key)))
        .cloned()
        .collect()
}
