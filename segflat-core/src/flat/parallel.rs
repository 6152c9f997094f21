//! Parallel execution strategy
//!
//! Scans use the chunked three-phase algorithm:
//!
//! 1. **Local scan**: split the input into fixed-size chunks and scan each
//!    chunk independently in parallel
//! 2. **Carry prefix**: exclusive-scan the chunk totals sequentially (there
//!    are only `len / chunk_size` of them)
//! 3. **Fix-up**: fold each chunk's carry into its elements in parallel
//!
//! This is O(n) work and needs only associativity from the monoid.

use crate::{
    error::{check_shape, Result, SegError},
    flat::{
        sequential::{fold_slice, scan_slice},
        ExecutionMode, Executor,
    },
    monoid::{Monoid, MonoidExt},
};
use rayon::prelude::*;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Parallel multi-threaded executor
#[derive(Debug, Clone)]
pub struct ParallelExecutor {
    chunk_size: usize,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl ParallelExecutor {
    /// Create an executor that runs on the rayon global pool
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            pool: None,
        }
    }

    /// Create an executor with a dedicated pool of `threads` workers
    pub fn with_threads(chunk_size: usize, threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| SegError::ThreadPool(e.to_string()))?;

        log::debug!(
            "built dedicated pool with {} threads ({} cpus available)",
            threads,
            num_cpus::get()
        );

        Ok(Self {
            chunk_size: chunk_size.max(1),
            pool: Some(Arc::new(pool)),
        })
    }

    /// Number of worker threads that will run the primitives
    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl Default for ParallelExecutor {
    fn default() -> Self {
        Self::new(4 * 1024)
    }
}

impl Executor for ParallelExecutor {
    fn map<A, B, F>(&self, items: &[A], f: F) -> Vec<B>
    where
        A: Sync,
        B: Send,
        F: Fn(&A) -> B + Send + Sync,
    {
        self.install(|| items.par_iter().map(f).collect())
    }

    fn tabulate<B, F>(&self, n: usize, f: F) -> Vec<B>
    where
        B: Send,
        F: Fn(usize) -> B + Send + Sync,
    {
        self.install(|| (0..n).into_par_iter().map(f).collect())
    }

    fn scan<M: Monoid>(&self, monoid: &M, values: &[M::Elem]) -> Vec<M::Elem> {
        if values.len() <= self.chunk_size {
            return scan_slice(monoid, values);
        }

        self.install(|| {
            // Phase 1: scan chunks in parallel
            let mut chunks: Vec<Vec<M::Elem>> = values
                .par_chunks(self.chunk_size)
                .map(|chunk| scan_slice(monoid, chunk))
                .collect();

            // Phase 2: carry into each chunk is the combined total of all earlier chunks
            let mut carries: SmallVec<[M::Elem; 16]> = SmallVec::with_capacity(chunks.len());
            let mut running = monoid.identity();
            for chunk in &chunks {
                carries.push(running.clone());
                if let Some(total) = chunk.last() {
                    running = monoid.combine(&running, total);
                }
            }

            log::trace!(
                "parallel scan: {} elements in {} chunks",
                values.len(),
                chunks.len()
            );

            // Phase 3: fold carries in; the first chunk's carry is the identity
            chunks
                .par_iter_mut()
                .zip(carries.as_slice().par_iter())
                .skip(1)
                .for_each(|(chunk, carry)| {
                    for value in chunk.iter_mut() {
                        *value = monoid.combine(carry, value);
                    }
                });

            chunks.concat()
        })
    }

    fn reduce<M: Monoid>(&self, monoid: &M, values: &[M::Elem]) -> M::Elem {
        if values.len() <= self.chunk_size {
            return fold_slice(monoid, values);
        }

        self.install(|| {
            let partials: Vec<M::Elem> = values
                .par_chunks(self.chunk_size)
                .map(|chunk| fold_slice(monoid, chunk))
                .collect();
            monoid.reduce_tree(partials)
        })
    }

    fn scatter<T>(&self, dest: &[T], indices: &[Option<usize>], values: &[T]) -> Result<Vec<T>>
    where
        T: Clone + Send + Sync,
    {
        check_shape("scatter", indices.len(), values.len())?;

        self.install(|| {
            // Per destination, remember the highest source position (plus one) writing to it
            let winners: Vec<AtomicUsize> = (0..dest.len()).map(|_| AtomicUsize::new(0)).collect();

            indices.par_iter().enumerate().for_each(|(source, index)| {
                if let Some(winner) = index.and_then(|i| winners.get(i)) {
                    winner.fetch_max(source + 1, Ordering::Relaxed);
                }
            });

            Ok(dest
                .par_iter()
                .zip(winners.par_iter())
                .map(|(original, winner)| match winner.load(Ordering::Relaxed) {
                    0 => original.clone(),
                    source => values[source - 1].clone(),
                })
                .collect())
        })
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat::SequentialExecutor;
    use crate::monoid::{FnMonoid, Max, Sum};
    use proptest::prelude::*;

    fn small_chunks() -> ParallelExecutor {
        ParallelExecutor::new(3)
    }

    #[test]
    fn test_scan_across_chunks() {
        let values: Vec<i64> = (1..=10).collect();
        let out = small_chunks().scan(&Sum::<i64>::new(), &values);
        assert_eq!(out, vec![1, 3, 6, 10, 15, 21, 28, 36, 45, 55]);
    }

    #[test]
    fn test_scan_non_commutative() {
        let concat = FnMonoid::new(|a: &String, b: &String| format!("{a}{b}"), String::new());
        let values: Vec<String> = "abcdefgh".chars().map(|c| c.to_string()).collect();
        let out = small_chunks().scan(&concat, &values);
        assert_eq!(out.last().map(String::as_str), Some("abcdefgh"));
        assert_eq!(out[4], "abcde");
    }

    #[test]
    fn test_reduce_across_chunks() {
        let values: Vec<i32> = vec![3, -1, 8, 2, 9, 4, 7];
        assert_eq!(small_chunks().reduce(&Max::<i32>::new(), &values), 9);
        assert_eq!(small_chunks().reduce(&Sum::<i32>::new(), &values), 32);
    }

    #[test]
    fn test_scatter_collisions_resolve_to_last_source() {
        let out = small_chunks()
            .scatter(
                &[0, 0, 0],
                &[Some(0), Some(2), Some(0), None, Some(7)],
                &[1, 2, 3, 4, 5],
            )
            .unwrap();
        assert_eq!(out, vec![3, 0, 2]);
    }

    #[test]
    fn test_dedicated_pool() {
        let executor = ParallelExecutor::with_threads(2, 2).unwrap();
        assert_eq!(executor.threads(), 2);
        let out = executor.tabulate(5, |i| i * 2);
        assert_eq!(out, vec![0, 2, 4, 6, 8]);
    }

    proptest! {
        #[test]
        fn prop_scan_matches_sequential(
            values in proptest::collection::vec(-1000i64..1000, 0..200),
            chunk in 1usize..17,
        ) {
            let sum = Sum::<i64>::new();
            prop_assert_eq!(
                ParallelExecutor::new(chunk).scan(&sum, &values),
                SequentialExecutor.scan(&sum, &values)
            );
        }

        #[test]
        fn prop_scatter_matches_sequential(
            writes in proptest::collection::vec((proptest::option::of(0usize..40), any::<i32>()), 0..100),
            len in 0usize..32,
        ) {
            let dest = vec![-1i32; len];
            let (indices, values): (Vec<_>, Vec<_>) = writes.into_iter().unzip();
            prop_assert_eq!(
                ParallelExecutor::new(4).scatter(&dest, &indices, &values).unwrap(),
                SequentialExecutor.scatter(&dest, &indices, &values).unwrap()
            );
        }
    }
}
