//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use segflat_core::{EngineConfig, ExecutionMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Engine configuration
    #[serde(default)]
    pub engine: EngineConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty print JSON output
    pub pretty_json: bool,

    /// Show a progress bar while running fixtures
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            show_progress: true,
        }
    }
}

/// Command-line values that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub mode: Option<ExecutionMode>,
    pub threads: Option<usize>,
    pub strict: bool,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(text).map_err(|err| CliError::ConfigError(err.to_string()))?;
        config
            .engine
            .validate()
            .map_err(|err| CliError::ConfigError(err.to_string()))?;
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(mode) = overrides.mode {
            self.engine.execution_mode = mode;
        }
        if let Some(threads) = overrides.threads {
            self.engine.threads = Some(threads);
        }
        if overrides.strict {
            self.engine.strict = true;
        }
    }
}
