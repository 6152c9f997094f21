//! Check command implementation

use super::Settings;
use crate::error::CliError;
use crate::input::load_fixture_files;
use crate::output::{create_formatter, CheckSummary, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{bail, Result};
use clap::Args;
use segflat_core::{builtin_fixtures, Fixture};
use std::io;

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Fixture files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Skip the built-in fixtures
    #[arg(long)]
    pub no_builtin: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl CheckArgs {
    /// Collect the fixtures selected by the arguments
    pub fn fixtures(&self) -> Result<Vec<Fixture>> {
        let mut fixtures = if self.no_builtin {
            Vec::new()
        } else {
            builtin_fixtures()
        };

        if !self.input.is_empty() {
            fixtures.extend(load_fixture_files(&self.input)?);
        }

        if fixtures.is_empty() {
            bail!("No fixtures to run");
        }
        Ok(fixtures)
    }

    /// Execute the check command
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        let fixtures = self.fixtures()?;
        let engine = settings.engine()?;
        log::info!("Running {} fixtures", fixtures.len());

        let mut progress = ProgressReporter::new(settings.quiet || !settings.output.show_progress);
        progress.init_fixtures(fixtures.len() as u64);

        let stdout = io::stdout();
        let mut formatter = create_formatter(self.format, settings.output.pretty_json, stdout.lock());
        let mut summary = CheckSummary::default();

        for fixture in &fixtures {
            let outcome = fixture.run(&engine);
            if !outcome.passed {
                log::warn!("fixture failed: {}", fixture.name);
            }
            summary.record(&outcome);
            formatter.write_outcome(&outcome)?;
            progress.record(&outcome);
        }

        progress.finish();
        formatter.write_summary(&summary)?;
        formatter.finish()?;

        if summary.failed > 0 {
            return Err(CliError::FixtureFailures {
                failed: summary.failed,
                total: summary.total,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(input: Vec<String>, no_builtin: bool) -> CheckArgs {
        CheckArgs {
            input,
            no_builtin,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_builtin_fixtures_selected_by_default() {
        let fixtures = args(Vec::new(), false).fixtures().unwrap();
        assert_eq!(fixtures.len(), builtin_fixtures().len());
    }

    #[test]
    fn test_no_fixtures_is_an_error() {
        assert!(args(Vec::new(), true).fixtures().is_err());
    }

    #[test]
    fn test_file_fixtures_appended() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("extra.toml");
        fs::write(
            &path,
            "[[fixture]]\nname = \"count\"\nentry = \"prime_count\"\ninput = [10]\noutput = 4\n",
        )
        .unwrap();

        let fixtures = args(vec![path.display().to_string()], true)
            .fixtures()
            .unwrap();
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].name, "count");
    }
}
