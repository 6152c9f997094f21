//! Flat data-parallel primitives and their execution strategies
//!
//! The segmented operations are written once against the [`Executor`]
//! trait. An executor supplies the handful of whole-array primitives they
//! need (map, tabulate, inclusive scan, reduce, scatter); the helpers in
//! [`ops`] derive the rest (iota, replicate, rotate, zip, filter, ...).

use crate::config::EngineConfig;
use crate::error::Result;
use crate::monoid::Monoid;
use serde::{Deserialize, Serialize};

mod engine;
pub mod ops;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

pub use engine::Engine;
pub use ops::{exclusive_scan, filter, iota, replicate, rotate, unzip, zip};
#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Single-threaded sequential execution
    Sequential,
    /// Multi-threaded execution on a rayon pool
    Parallel,
    /// Choose per call based on array length
    #[default]
    Adaptive,
}

/// Whole-array primitives that segmented operations are built from
///
/// Every method is a pure function of its arguments: inputs are borrowed
/// immutably and outputs are freshly allocated. Implementations may
/// partition work arbitrarily but must return the same result a
/// left-to-right sequential evaluation would, given an associative monoid.
pub trait Executor: Send + Sync {
    /// Apply `f` to every element
    fn map<A, B, F>(&self, items: &[A], f: F) -> Vec<B>
    where
        A: Sync,
        B: Send,
        F: Fn(&A) -> B + Send + Sync;

    /// Build an array of length `n` whose element `i` is `f(i)`
    fn tabulate<B, F>(&self, n: usize, f: F) -> Vec<B>
    where
        B: Send,
        F: Fn(usize) -> B + Send + Sync;

    /// Inclusive scan: `out[i] = values[0] <> ... <> values[i]`
    fn scan<M: Monoid>(&self, monoid: &M, values: &[M::Elem]) -> Vec<M::Elem>;

    /// Reduce all elements, `identity` for an empty array
    fn reduce<M: Monoid>(&self, monoid: &M, values: &[M::Elem]) -> M::Elem;

    /// Copy `dest` and write `values[i]` at `indices[i]` for every `Some` index
    ///
    /// Writes whose index is `None` or not below `dest.len()` are discarded.
    /// When several writes target one position the write with the highest
    /// source position wins.
    fn scatter<T>(&self, dest: &[T], indices: &[Option<usize>], values: &[T]) -> Result<Vec<T>>
    where
        T: Clone + Send + Sync;

    /// The mode this executor runs in
    fn mode(&self) -> ExecutionMode;

    /// Whether cheap precondition checks should reject bad input
    fn strict(&self) -> bool {
        false
    }
}

/// Resolve the configured mode to a concrete one for an input of `len` elements
pub fn auto_select(len: usize, config: &EngineConfig) -> ExecutionMode {
    match config.execution_mode {
        ExecutionMode::Sequential => ExecutionMode::Sequential,
        #[cfg(feature = "parallel")]
        ExecutionMode::Parallel => ExecutionMode::Parallel,
        #[cfg(feature = "parallel")]
        ExecutionMode::Adaptive if len >= config.parallel_threshold => ExecutionMode::Parallel,
        _ => ExecutionMode::Sequential,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_select_sequential_config() {
        let config = EngineConfig::sequential();
        assert_eq!(auto_select(10_000_000, &config), ExecutionMode::Sequential);
    }

    #[test]
    fn test_auto_select_adaptive_small_input() {
        let config = EngineConfig::default();
        assert_eq!(auto_select(10, &config), ExecutionMode::Sequential);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_auto_select_adaptive_large_input() {
        let config = EngineConfig::default();
        assert_eq!(
            auto_select(config.parallel_threshold, &config),
            ExecutionMode::Parallel
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_auto_select_forced_parallel() {
        let config = EngineConfig::parallel();
        assert_eq!(auto_select(0, &config), ExecutionMode::Parallel);
    }

    #[test]
    fn test_mode_serde_names() {
        let mode: ExecutionMode = serde_json::from_str("\"parallel\"").unwrap();
        assert_eq!(mode, ExecutionMode::Parallel);
        assert_eq!(
            serde_json::to_string(&ExecutionMode::Adaptive).unwrap(),
            "\"adaptive\""
        );
    }
}
