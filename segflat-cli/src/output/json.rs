//! JSON output formatter

use super::{CheckSummary, OutputFormatter, PrimeReport};
use anyhow::Result;
use segflat_core::FixtureOutcome;
use serde::Serialize;
use std::io::Write;

/// JSON formatter - buffers results and writes one document on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    primes: Option<PrimeReport>,
    outcomes: Vec<FixtureOutcome>,
    summary: Option<CheckSummary>,
}

/// Document written for a fixture run
#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    summary: &'a CheckSummary,
    outcomes: &'a [FixtureOutcome],
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            primes: None,
            outcomes: Vec::new(),
            summary: None,
        }
    }

    fn emit<T: Serialize>(&mut self, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn write_primes(&mut self, report: &PrimeReport) -> Result<()> {
        self.primes = Some(report.clone());
        Ok(())
    }

    fn write_outcome(&mut self, outcome: &FixtureOutcome) -> Result<()> {
        self.outcomes.push(outcome.clone());
        Ok(())
    }

    fn write_summary(&mut self, summary: &CheckSummary) -> Result<()> {
        self.summary = Some(summary.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(report) = self.primes.take() {
            self.emit(&report)?;
        } else if let Some(summary) = self.summary.take() {
            let outcomes = std::mem::take(&mut self.outcomes);
            self.emit(&CheckReport {
                summary: &summary,
                outcomes: &outcomes,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
