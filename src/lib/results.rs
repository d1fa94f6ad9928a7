//! Validation outcomes.
//!
//! Every check produces [`ValidationResult`]s as data; nothing is thrown past the
//! orchestrator. A run has failed if any result has [`Severity::Error`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default cap on the number of offending items enumerated in one message.
pub const MAX_LISTED_ITEMS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        })
    }
}

/// One outcome of one check. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub name: String,
    pub severity: Severity,
    pub message: String,
}

impl ValidationResult {
    #[must_use]
    pub fn new(name: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self { name: name.to_string(), severity, message: message.into() }
    }

    #[must_use]
    pub fn info(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, Severity::Info, message)
    }

    #[must_use]
    pub fn warning(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, Severity::Warning, message)
    }

    #[must_use]
    pub fn error(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, Severity::Error, message)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.name, self.message)
    }
}

/// Joins `items` with `"; "`, listing at most `cap` and noting how many were left out.
///
/// # Example
/// ```
/// use fgsheet_lib::results::enumerate_capped;
///
/// assert_eq!(enumerate_capped(["a", "b"], 10), "a; b");
/// assert_eq!(enumerate_capped(["a", "b", "c"], 2), "a; b; ... and 1 more not shown");
/// ```
#[must_use]
pub fn enumerate_capped<I, S>(items: I, cap: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: fmt::Display,
{
    let mut listed = Vec::new();
    let mut hidden = 0_usize;
    for item in items {
        if listed.len() < cap {
            listed.push(item.to_string());
        } else {
            hidden += 1;
        }
    }
    if hidden > 0 {
        listed.push(format!("... and {hidden} more not shown"));
    }
    listed.join("; ")
}

/// True if no result is an error.
#[must_use]
pub fn all_passed(results: &[ValidationResult]) -> bool {
    !results.iter().any(ValidationResult::is_error)
}
