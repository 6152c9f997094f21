//! Progress reporting for fixture runs

use indicatif::{ProgressBar, ProgressStyle};
use segflat_core::FixtureOutcome;
use std::time::Duration;

const TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} fixtures {prefix} {msg}";

/// Progress bar that tracks passing and failing fixtures
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    failed: u64,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a reporter; a quiet reporter never draws
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: None,
            failed: 0,
            quiet,
        }
    }

    /// Start a bar for `total` fixtures
    pub fn init_fixtures(&mut self, total: u64) {
        if self.quiet {
            return;
        }

        let style = ProgressStyle::default_bar()
            .template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");

        let bar = ProgressBar::new(total).with_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Record one finished fixture
    pub fn record(&mut self, outcome: &FixtureOutcome) {
        if !outcome.passed {
            self.failed += 1;
        }

        if let Some(bar) = &self.bar {
            let mark = if outcome.passed { '✓' } else { '✗' };
            bar.set_message(format!("{mark} {}", outcome.name));
            if self.failed > 0 {
                bar.set_prefix(format!("({} failed)", self.failed));
            }
            bar.inc(1);
        }
    }

    /// Number of failing fixtures seen so far
    pub fn failed(&self) -> u64 {
        self.failed
    }

    /// Clear the bar on success, leave it on screen when something failed
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            if self.failed == 0 {
                bar.finish_and_clear();
            } else {
                bar.abandon_with_message(format!("{} failed", self.failed));
            }
        }
    }
}
