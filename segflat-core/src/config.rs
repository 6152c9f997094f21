//! Configuration types for the execution engine

use crate::error::{Result, SegError};
use crate::flat::ExecutionMode;
use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Execution mode selector
    pub execution_mode: ExecutionMode,
    /// Number of threads for parallel execution (None = rayon global pool)
    pub threads: Option<usize>,
    /// Minimum array length for parallel execution in adaptive mode
    pub parallel_threshold: usize,
    /// Elements per chunk in the chunked parallel scan and reduce
    pub chunk_size: usize,
    /// Reject precondition violations that can be detected cheaply
    pub strict: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Adaptive,
            threads: None,
            parallel_threshold: 16 * 1024,
            chunk_size: 4 * 1024,
            strict: false,
        }
    }
}

impl EngineConfig {
    /// Create a single-threaded configuration
    pub fn sequential() -> Self {
        Self {
            execution_mode: ExecutionMode::Sequential,
            threads: Some(1),
            parallel_threshold: usize::MAX, // Never use parallel
            ..Self::default()
        }
    }

    /// Create a configuration that always runs on the thread pool
    pub fn parallel() -> Self {
        Self {
            execution_mode: ExecutionMode::Parallel,
            parallel_threshold: 0,
            ..Self::default()
        }
    }

    /// Create a balanced configuration
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(SegError::Config("chunk_size must be positive".to_string()));
        }
        if self.threads == Some(0) {
            return Err(SegError::Config(
                "threads must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_adaptive() {
        let config = EngineConfig::default();
        assert_eq!(config.execution_mode, ExecutionMode::Adaptive);
        assert_eq!(config.threads, None);
        assert!(!config.strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            EngineConfig::sequential().execution_mode,
            ExecutionMode::Sequential
        );
        assert_eq!(
            EngineConfig::parallel().execution_mode,
            ExecutionMode::Parallel
        );
        assert_eq!(EngineConfig::balanced(), EngineConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_chunk() {
        let config = EngineConfig {
            chunk_size: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(SegError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        let config = EngineConfig {
            threads: Some(0),
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
execution_mode = "parallel"
chunk_size = 128
"#,
        )
        .unwrap();

        assert_eq!(config.execution_mode, ExecutionMode::Parallel);
        assert_eq!(config.chunk_size, 128);
        assert_eq!(config.parallel_threshold, 16 * 1024);
        assert!(!config.strict);
    }
}
