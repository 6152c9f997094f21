//! Primes command implementation

use super::Settings;
use crate::output::{create_formatter, OutputFormat, PrimeReport};
use anyhow::{Context, Result};
use clap::Args;
use segflat_core::primes;
use std::io;
use std::time::Instant;

/// Arguments for the primes command
#[derive(Debug, Args)]
pub struct PrimesArgs {
    /// Inclusive upper bound
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub limit: i64,

    /// Print only the number of primes
    #[arg(long)]
    pub count: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl PrimesArgs {
    /// Execute the primes command
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        let engine = settings.engine()?;

        log::info!("Sieving primes up to {}", self.limit);
        let started = Instant::now();
        let found = primes(&engine, self.limit)
            .with_context(|| format!("Sieve failed for limit {}", self.limit))?;
        log::info!(
            "Found {} primes in {:.2?}",
            found.len(),
            started.elapsed()
        );

        let report = PrimeReport {
            limit: self.limit,
            count: found.len(),
            primes: (!self.count).then_some(found),
        };

        let stdout = io::stdout();
        let mut formatter = create_formatter(self.format, settings.output.pretty_json, stdout.lock());
        formatter.write_primes(&report)?;
        formatter.finish()
    }
}
