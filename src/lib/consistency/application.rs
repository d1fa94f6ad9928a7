//! Application profile references and settings agreement.

use std::collections::BTreeMap;

use itertools::Itertools;
use log::debug;

use super::ConsistencyCheck;
use crate::application::{ApplicationProfile, differing_keys};
use crate::options::ValidationContext;
use crate::results::{ValidationResult, enumerate_capped};
use crate::run_config::RunConfiguration;
use crate::sample::SampleTable;

pub const APPLICATION_SETTINGS: &str = "application_settings";

/// Profiles referenced by samples must exist in the catalog, a sample may reference at
/// most one profile per application type, and all samples using an application type
/// must agree on its settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationSettings;

impl ConsistencyCheck for ApplicationSettings {
    fn name(&self) -> &'static str {
        APPLICATION_SETTINGS
    }

    fn check(
        &self,
        samples: &SampleTable,
        _run: &RunConfiguration,
        context: &ValidationContext,
    ) -> Vec<ValidationResult> {
        debug!("Checking application profiles against {} known profiles", context.catalog.len());
        let cap = context.options.max_listed;
        let mut results = Vec::new();

        let mut missing = Vec::new();
        let mut repeated_types = Vec::new();
        // application type -> profile name -> profile
        let mut by_type: BTreeMap<&str, BTreeMap<&str, &ApplicationProfile>> = BTreeMap::new();

        for record in &samples.records {
            let mut profiles = Vec::new();
            for name in &record.application_profiles {
                match context.catalog.get(name) {
                    Some(profile) => profiles.push(profile),
                    None => missing.push(format!("{} references '{name}'", record.sample_id)),
                }
            }
            let mut names_by_type: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
            for profile in &profiles {
                names_by_type
                    .entry(profile.application_type.as_str())
                    .or_default()
                    .push(profile.name.as_str());
            }
            for (application_type, names) in names_by_type {
                if names.len() > 1 {
                    repeated_types.push(format!(
                        "{} uses {} profiles of type {application_type} ({})",
                        record.sample_id,
                        names.len(),
                        names.join(", ")
                    ));
                }
            }
            for profile in profiles {
                by_type
                    .entry(profile.application_type.as_str())
                    .or_default()
                    .insert(profile.name.as_str(), profile);
            }
        }

        if !missing.is_empty() {
            results.push(ValidationResult::error(
                APPLICATION_SETTINGS,
                format!("Unknown application profile(s): {}", enumerate_capped(&missing, cap)),
            ));
        }
        if !repeated_types.is_empty() {
            results.push(ValidationResult::error(
                APPLICATION_SETTINGS,
                format!(
                    "More than one profile of the same application type: {}",
                    enumerate_capped(&repeated_types, cap)
                ),
            ));
        }

        for (application_type, profiles) in &by_type {
            let keys = differing_keys(profiles.values().map(|p| &p.settings));
            if !keys.is_empty() {
                results.push(ValidationResult::error(
                    APPLICATION_SETTINGS,
                    format!(
                        "Settings differ between {application_type} profiles ({}) for key(s): {}",
                        profiles.keys().join(", "),
                        keys.join(", ")
                    ),
                ));
            }
        }

        if results.is_empty() {
            results.push(ValidationResult::info(
                APPLICATION_SETTINGS,
                format!(
                    "Application settings are consistent across {} application type(s)",
                    by_type.len()
                ),
            ));
        }
        results
    }
}
