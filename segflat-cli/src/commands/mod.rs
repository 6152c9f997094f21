//! CLI command implementations

use crate::config::{CliConfig, OutputConfig, Overrides};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use segflat_core::{Engine, EngineConfig, ExecutionMode};
use std::path::PathBuf;

pub mod check;
pub mod list;
pub mod primes;

/// Segmented array primitives: prime sieve and fixture runner
#[derive(Debug, Parser)]
#[command(name = "segflat", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Execution mode for the flat primitives
    #[arg(short, long, global = true, value_enum)]
    pub mode: Option<ModeArg>,

    /// Number of worker threads for parallel execution
    #[arg(short, long, global = true, env = "SEGFLAT_THREADS", value_name = "N")]
    pub threads: Option<usize>,

    /// Reject inputs whose first flag does not start a segment
    #[arg(long, global = true)]
    pub strict: bool,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Execution modes accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Single-threaded reference execution
    Sequential,
    /// Chunked execution on the rayon pool
    Parallel,
    /// Parallel above the configured size threshold
    Adaptive,
}

impl From<ModeArg> for ExecutionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sequential => ExecutionMode::Sequential,
            ModeArg::Parallel => ExecutionMode::Parallel,
            ModeArg::Adaptive => ExecutionMode::Adaptive,
        }
    }
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the prime sieve
    Primes(primes::PrimesArgs),

    /// Run built-in and file fixtures
    Check(check::CheckArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List entry points callable from fixtures
    Entries,

    /// List built-in fixtures
    Fixtures,
}

/// Configuration resolved from the file and command-line flags
#[derive(Debug, Clone)]
pub struct Settings {
    pub engine: EngineConfig,
    pub output: OutputConfig,
    pub quiet: bool,
}

impl Settings {
    /// Build the engine described by these settings
    pub fn engine(&self) -> Result<Engine> {
        let engine = Engine::new(self.engine.clone()).context("Failed to build execution engine")?;
        log::debug!("engine configuration: {:?}", engine.config());
        Ok(engine)
    }
}

impl GlobalArgs {
    /// Initialize logging based on verbosity level
    ///
    /// Installs the global logger, so it must be called at most once per process.
    pub fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }

    /// Load the configuration file, if any, and apply flag overrides
    pub fn settings(&self) -> Result<Settings> {
        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        config.apply(&Overrides {
            mode: self.mode.map(ExecutionMode::from),
            threads: self.threads,
            strict: self.strict,
        });

        Ok(Settings {
            engine: config.engine,
            output: config.output,
            quiet: self.quiet,
        })
    }
}

impl Cli {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        let settings = self.global.settings()?;
        log::debug!("Arguments: {:?}", self);

        match &self.command {
            Commands::Primes(args) => args.execute(&settings),
            Commands::Check(args) => args.execute(&settings),
            Commands::List { subcommand } => list::execute(subcommand),
        }
    }
}
