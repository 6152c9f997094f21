//! Adaptive execution engine
//!
//! Selects between sequential and parallel execution per primitive call,
//! based on the length of the array being processed.

use crate::{
    config::EngineConfig,
    error::Result,
    flat::{auto_select, ExecutionMode, Executor, SequentialExecutor},
    monoid::Monoid,
};

#[cfg(feature = "parallel")]
use crate::flat::ParallelExecutor;

/// Configured executor that dispatches each call to the best strategy
#[derive(Debug, Clone)]
pub struct Engine {
    sequential: SequentialExecutor,
    #[cfg(feature = "parallel")]
    parallel: ParallelExecutor,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        #[cfg(feature = "parallel")]
        let parallel = match config.threads {
            Some(threads) if config.execution_mode != ExecutionMode::Sequential => {
                ParallelExecutor::with_threads(config.chunk_size, threads)?
            }
            _ => ParallelExecutor::new(config.chunk_size),
        };

        log::debug!(
            "engine ready: mode={:?} threshold={} chunk_size={} strict={}",
            config.execution_mode,
            config.parallel_threshold,
            config.chunk_size,
            config.strict
        );

        Ok(Self {
            sequential: SequentialExecutor,
            #[cfg(feature = "parallel")]
            parallel,
            config,
        })
    }

    /// Engine that never leaves the calling thread
    pub fn sequential() -> Self {
        Self {
            sequential: SequentialExecutor,
            #[cfg(feature = "parallel")]
            parallel: ParallelExecutor::new(EngineConfig::default().chunk_size),
            config: EngineConfig::sequential(),
        }
    }

    /// The configuration this engine was built from
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Select the execution mode for an input of `len` elements
    pub fn select_mode(&self, len: usize) -> ExecutionMode {
        auto_select(len, &self.config)
    }
}

impl Default for Engine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            sequential: SequentialExecutor,
            #[cfg(feature = "parallel")]
            parallel: ParallelExecutor::new(config.chunk_size),
            config,
        }
    }
}

// Dispatch `$call` to the executor selected for an input of `$len` elements.
macro_rules! dispatch {
    ($self:ident, $len:expr, |$exec:ident| $call:expr) => {
        match $self.select_mode($len) {
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => {
                let $exec = &$self.parallel;
                $call
            }
            _ => {
                let $exec = &$self.sequential;
                $call
            }
        }
    };
}

impl Executor for Engine {
    fn map<A, B, F>(&self, items: &[A], f: F) -> Vec<B>
    where
        A: Sync,
        B: Send,
        F: Fn(&A) -> B + Send + Sync,
    {
        dispatch!(self, items.len(), |exec| exec.map(items, f))
    }

    fn tabulate<B, F>(&self, n: usize, f: F) -> Vec<B>
    where
        B: Send,
        F: Fn(usize) -> B + Send + Sync,
    {
        dispatch!(self, n, |exec| exec.tabulate(n, f))
    }

    fn scan<M: Monoid>(&self, monoid: &M, values: &[M::Elem]) -> Vec<M::Elem> {
        dispatch!(self, values.len(), |exec| exec.scan(monoid, values))
    }

    fn reduce<M: Monoid>(&self, monoid: &M, values: &[M::Elem]) -> M::Elem {
        dispatch!(self, values.len(), |exec| exec.reduce(monoid, values))
    }

    fn scatter<T>(&self, dest: &[T], indices: &[Option<usize>], values: &[T]) -> Result<Vec<T>>
    where
        T: Clone + Send + Sync,
    {
        let len = dest.len().max(indices.len());
        dispatch!(self, len, |exec| exec.scatter(dest, indices, values))
    }

    fn mode(&self) -> ExecutionMode {
        self.config.execution_mode
    }

    fn strict(&self) -> bool {
        self.config.strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SegError;
    use crate::monoid::Sum;

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = EngineConfig {
            chunk_size: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(Engine::new(config), Err(SegError::Config(_))));
    }

    #[test]
    fn test_sequential_engine_never_goes_parallel() {
        let engine = Engine::sequential();
        assert_eq!(engine.select_mode(usize::MAX), ExecutionMode::Sequential);
        assert_eq!(engine.mode(), ExecutionMode::Sequential);
    }

    #[test]
    fn test_strict_flag_is_forwarded() {
        let engine = Engine::new(EngineConfig {
            strict: true,
            ..EngineConfig::default()
        })
        .unwrap();
        assert!(engine.strict());
        assert!(!Engine::default().strict());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_engine_matches_sequential() {
        let engine = Engine::new(EngineConfig {
            chunk_size: 7,
            threads: Some(2),
            ..EngineConfig::parallel()
        })
        .unwrap();
        let values: Vec<u64> = (0..100).collect();

        assert_eq!(engine.select_mode(values.len()), ExecutionMode::Parallel);
        assert_eq!(
            engine.scan(&Sum::<u64>::new(), &values),
            SequentialExecutor.scan(&Sum::<u64>::new(), &values)
        );
        assert_eq!(engine.reduce(&Sum::<u64>::new(), &values), 4950);
    }
}
