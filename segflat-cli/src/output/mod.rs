//! Output formatting module

use anyhow::Result;
use segflat_core::FixtureOutcome;
use serde::{Deserialize, Serialize};
use std::io::Write;

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// A single JSON document
    Json,
}

/// Result of a sieve run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeReport {
    /// Inclusive upper bound
    pub limit: i64,
    /// Number of primes found
    pub count: usize,
    /// The primes themselves, omitted in count-only mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primes: Option<Vec<i64>>,
}

/// Totals for a fixture run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl CheckSummary {
    /// Count one outcome
    pub fn record(&mut self, outcome: &FixtureOutcome) {
        self.total += 1;
        if outcome.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Output the result of a sieve run
    fn write_primes(&mut self, report: &PrimeReport) -> Result<()>;

    /// Output a single fixture outcome
    fn write_outcome(&mut self, outcome: &FixtureOutcome) -> Result<()>;

    /// Output the totals of a fixture run
    fn write_summary(&mut self, summary: &CheckSummary) -> Result<()>;

    /// Finalize output
    fn finish(&mut self) -> Result<()>;
}

/// Build the formatter for the requested format
pub fn create_formatter<'a, W: Write + 'a>(
    format: OutputFormat,
    pretty_json: bool,
    writer: W,
) -> Box<dyn OutputFormatter + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
    }
}
