//! Resolve one override-cycles pattern against a run's read cycles.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use fgsheet_lib::override_cycles::OverrideCyclesPattern;
use fgsheet_lib::run_config::ReadCycles;

use crate::commands::command::Command;

/// Prints the resolved override cycles string.
#[derive(Debug, Parser)]
#[command(
    name = "override-cycles",
    about = "\x1b[38;5;30m[UTILITIES]\x1b[0m      \x1b[36mResolve an override-cycles pattern\x1b[0m",
    long_about = r#"
Resolve an override-cycles pattern against a run's read cycles.

Each `{r}` or `{i}` placeholder is replaced by the cycles of its segment that the
literal tokens do not account for. The resolved string is printed to standard output.

Example usage:
  fgsheet override-cycles --pattern 'U7Y{r}-I{i}-I{i}-Y{r}' --cycles 151,10,10,151
"#
)]
pub struct OverrideCycles {
    /// Pattern with four dash-separated segments, e.g. `Y{r}-I{i}-I{i}-Y{r}`
    #[arg(short = 'p', long = "pattern")]
    pub pattern: String,

    /// Configured cycles as `read1,index1,index2,read2`
    #[arg(short = 'c', long = "cycles")]
    pub cycles: ReadCycles,
}

impl Command for OverrideCycles {
    fn execute(&self, _command_line: &str) -> Result<()> {
        self.cycles.validate()?;
        let pattern: OverrideCyclesPattern = self
            .pattern
            .parse()
            .with_context(|| format!("Failed to parse override cycles '{}'", self.pattern))?;
        let resolved = pattern
            .resolve(&self.cycles)
            .with_context(|| format!("Failed to resolve override cycles '{}'", self.pattern))?;
        info!("Resolved {} to {resolved}", self.pattern);
        println!("{resolved}");
        Ok(())
    }
}
