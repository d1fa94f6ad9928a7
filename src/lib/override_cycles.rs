//! Override-cycles patterns and their resolution against a run's read cycles.
//!
//! A pattern has four dash-separated segments, one per read segment in sequencing order
//! (`Read1-Index1-Index2-Read2`). Each segment is a run of tokens, each a letter followed
//! by either a cycle count or a placeholder:
//!
//! | segment | letters | placeholder |
//! |---------|---------|-------------|
//! | read    | `Y` (read), `N` (skip), `U` (UMI) | `{r}` |
//! | index   | `I` (index), `N` (skip), `U` (UMI) | `{i}` |
//!
//! A segment may hold at most one placeholder. The placeholder absorbs every configured
//! cycle the literal tokens do not account for, so `Y{r}` on a 151-cycle read resolves
//! to `Y151`, and `U8Y{r}` to `U8Y143`. A segment without a placeholder must account for
//! its configured cycles exactly.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{FgsheetError, Result};
use crate::run_config::{ReadCycles, ReadSegment};

static READ_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[YNU](?:\d+|\{r\}))+$").expect("read segment grammar is a valid regex")
});

static INDEX_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[INU](?:\d+|\{i\}))+$").expect("index segment grammar is a valid regex")
});

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([YINU])(\d+|\{[ri]\})").expect("token grammar is a valid regex")
});

/// One `LETTER DIGITS` or `LETTER PLACEHOLDER` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleToken {
    Literal { letter: char, cycles: u32 },
    Placeholder { letter: char },
}

/// A parsed, not yet resolved, segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPattern {
    pub segment: ReadSegment,
    pub tokens: Vec<CycleToken>,
}

impl SegmentPattern {
    fn parse(segment: ReadSegment, text: &str) -> Result<Self> {
        let (grammar, placeholder) = if segment.is_index() {
            (&*INDEX_SEGMENT, "{i}")
        } else {
            (&*READ_SEGMENT, "{r}")
        };
        let invalid = |reason: String| FgsheetError::InvalidOverrideCycles {
            segment: text.to_string(),
            reason,
        };

        if !grammar.is_match(text) {
            return Err(invalid(format!(
                "{segment} segment must be a run of letter/count tokens with an optional {placeholder}"
            )));
        }

        let mut tokens = Vec::new();
        for captures in TOKEN.captures_iter(text) {
            let letter = captures[1].chars().next().unwrap_or_default();
            let value = &captures[2];
            if value.starts_with('{') {
                tokens.push(CycleToken::Placeholder { letter });
            } else {
                let cycles = value
                    .parse::<u32>()
                    .map_err(|e| invalid(format!("cycle count '{value}' is not valid: {e}")))?;
                tokens.push(CycleToken::Literal { letter, cycles });
            }
        }

        let placeholders =
            tokens.iter().filter(|t| matches!(t, CycleToken::Placeholder { .. })).count();
        if placeholders > 1 {
            return Err(invalid(format!(
                "{segment} segment has {placeholders} placeholders, at most one is allowed"
            )));
        }

        Ok(Self { segment, tokens })
    }

    /// Sum of the literal token counts.
    #[must_use]
    pub fn literal_cycles(&self) -> u64 {
        self.tokens
            .iter()
            .map(|t| match t {
                CycleToken::Literal { cycles, .. } => u64::from(*cycles),
                CycleToken::Placeholder { .. } => 0,
            })
            .sum()
    }

    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.tokens.iter().any(|t| matches!(t, CycleToken::Placeholder { .. }))
    }

    /// Substitutes the placeholder so the segment spans exactly `configured` cycles.
    ///
    /// A placeholder that would resolve to zero cycles is rejected along with a negative
    /// one: a zero-length token such as `Y0` is not a valid override-cycles entry.
    ///
    /// # Errors
    /// Returns an error if the literal tokens leave no cycles for the placeholder, or if
    /// a segment without a placeholder does not match `configured`.
    pub fn resolve(&self, configured: u32) -> Result<String> {
        let literal = self.literal_cycles();
        let configured_cycles = u64::from(configured);
        let invalid = |reason: String| FgsheetError::InvalidOverrideCycles {
            segment: self.to_string(),
            reason,
        };

        let placeholder_value = if self.has_placeholder() {
            if literal >= configured_cycles {
                return Err(invalid(format!(
                    "literal cycles ({literal}) leave nothing for the placeholder out of \
                     {configured} configured {} cycles",
                    self.segment
                )));
            }
            configured_cycles - literal
        } else {
            if literal != configured_cycles {
                return Err(invalid(format!(
                    "segment spans {literal} cycles but {} is configured with {configured}",
                    self.segment
                )));
            }
            0
        };

        Ok(self
            .tokens
            .iter()
            .map(|t| match t {
                CycleToken::Literal { letter, cycles } => format!("{letter}{cycles}"),
                CycleToken::Placeholder { letter } => format!("{letter}{placeholder_value}"),
            })
            .collect())
    }
}

impl fmt::Display for SegmentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let placeholder = if self.segment.is_index() { "{i}" } else { "{r}" };
        for token in &self.tokens {
            match token {
                CycleToken::Literal { letter, cycles } => write!(f, "{letter}{cycles}")?,
                CycleToken::Placeholder { letter } => write!(f, "{letter}{placeholder}")?,
            }
        }
        Ok(())
    }
}

/// A parsed four-segment override-cycles pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideCyclesPattern {
    segments: Vec<SegmentPattern>,
}

impl OverrideCyclesPattern {
    /// Parses and checks the grammar of every segment.
    ///
    /// # Errors
    /// Returns an error naming the first offending segment, or the whole pattern if it
    /// does not have exactly four segments.
    pub fn parse(pattern: &str) -> Result<Self> {
        let parts: Vec<&str> = pattern.trim().split('-').collect();
        if parts.len() != ReadSegment::ALL.len() {
            return Err(FgsheetError::InvalidOverrideCycles {
                segment: pattern.to_string(),
                reason: format!(
                    "expected {} dash-separated segments, found {}",
                    ReadSegment::ALL.len(),
                    parts.len()
                ),
            });
        }
        let segments = ReadSegment::ALL
            .iter()
            .zip(parts)
            .map(|(&segment, text)| SegmentPattern::parse(segment, text))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[SegmentPattern] {
        &self.segments
    }

    /// Resolves every segment against `cycles` and joins them with `-`.
    ///
    /// # Errors
    /// Returns an error naming the first segment that cannot be resolved.
    pub fn resolve(&self, cycles: &ReadCycles) -> Result<String> {
        let resolved = self
            .segments
            .iter()
            .map(|s| s.resolve(cycles.for_segment(s.segment)))
            .collect::<Result<Vec<_>>>()?;
        Ok(resolved.join("-"))
    }
}

impl FromStr for OverrideCyclesPattern {
    type Err = FgsheetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parses `pattern` and resolves it against `cycles`.
///
/// # Errors
/// Returns an error if the pattern is malformed or cannot be resolved.
///
/// # Example
/// ```
/// use fgsheet_lib::override_cycles::resolve_override_cycles;
/// use fgsheet_lib::run_config::ReadCycles;
///
/// let cycles = ReadCycles::new(151, 8, 8, 151);
/// assert_eq!(resolve_override_cycles("Y{r}-I8-I8-Y{r}", &cycles).unwrap(), "Y151-I8-I8-Y151");
/// ```
pub fn resolve_override_cycles(pattern: &str, cycles: &ReadCycles) -> Result<String> {
    OverrideCyclesPattern::parse(pattern)?.resolve(cycles)
}

/// Sum of the counts of every `LETTER DIGITS` token in `text`.
#[must_use]
pub fn cycle_sum(text: &str) -> u64 {
    TOKEN
        .captures_iter(text)
        .filter_map(|c| c[2].parse::<u64>().ok())
        .sum()
}

/// The override-cycles string of one sample, as exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOverrideCycles {
    pub sample_id: String,
    pub pattern: String,
    /// `None` if the pattern could not be resolved; the reason is reported as a result.
    pub resolved: Option<String>,
}
