//! Plain text output formatter

use super::{CheckSummary, OutputFormatter, PrimeReport};
use anyhow::Result;
use segflat_core::FixtureOutcome;
use std::io::Write;

/// Plain text formatter
///
/// Primes are written one per line (or just the count), fixture outcomes one
/// line each followed by a totals line.
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn write_primes(&mut self, report: &PrimeReport) -> Result<()> {
        match &report.primes {
            Some(primes) => {
                for p in primes {
                    writeln!(self.writer, "{}", p)?;
                }
            }
            None => writeln!(self.writer, "{}", report.count)?,
        }
        Ok(())
    }

    fn write_outcome(&mut self, outcome: &FixtureOutcome) -> Result<()> {
        if outcome.passed {
            writeln!(self.writer, "✓ {} ({})", outcome.name, outcome.entry)?;
            return Ok(());
        }

        write!(self.writer, "✗ {} ({}): ", outcome.name, outcome.entry)?;
        match (&outcome.actual, &outcome.error) {
            (_, Some(error)) => writeln!(self.writer, "error: {}", error)?,
            (Some(actual), None) => writeln!(
                self.writer,
                "expected {}, got {}",
                outcome.expected, actual
            )?,
            (None, None) => writeln!(self.writer, "no result")?,
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &CheckSummary) -> Result<()> {
        writeln!(
            self.writer,
            "\n{} passed, {} failed ({} total)",
            summary.passed, summary.failed, summary.total
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segflat_core::{EntryPoint, Fixture, Literal, SequentialExecutor};

    fn render(f: impl FnOnce(&mut TextFormatter<&mut Vec<u8>>)) -> String {
        let mut buffer = Vec::new();
        let mut formatter = TextFormatter::new(&mut buffer);
        f(&mut formatter);
        formatter.finish().unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_primes_one_per_line() {
        let out = render(|fmt| {
            fmt.write_primes(&PrimeReport {
                limit: 10,
                count: 4,
                primes: Some(vec![2, 3, 5, 7]),
            })
            .unwrap()
        });
        assert_eq!(out, "2\n3\n5\n7\n");
    }

    #[test]
    fn test_failed_outcome_shows_both_values() {
        let fixture = Fixture::new(
            "wrong",
            EntryPoint::PrimeCount,
            vec![Literal::Int(10)],
            Literal::Int(5),
        );
        let outcome = fixture.run(&SequentialExecutor);

        let out = render(|fmt| fmt.write_outcome(&outcome).unwrap());
        assert_eq!(out, "✗ wrong (prime_count): expected 5, got 4\n");
    }

    #[test]
    fn test_passed_outcome_and_summary() {
        let fixture = Fixture::new(
            "ok",
            EntryPoint::SegmentedIota,
            vec![Literal::Bools(vec![true, false, true])],
            Literal::Ints(vec![0, 1, 0]),
        );
        let outcome = fixture.run(&SequentialExecutor);

        let out = render(|fmt| {
            fmt.write_outcome(&outcome).unwrap();
            fmt.write_summary(&CheckSummary {
                total: 1,
                passed: 1,
                failed: 0,
            })
            .unwrap();
        });
        assert!(out.starts_with("✓ ok (segmented_iota)\n"));
        assert!(out.ends_with("1 passed, 0 failed (1 total)\n"));
    }
}
