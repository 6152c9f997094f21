//! Sequential execution strategy

use crate::{
    error::{check_shape, Result},
    flat::{ExecutionMode, Executor},
    monoid::Monoid,
};

/// Sequential single-threaded executor
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn map<A, B, F>(&self, items: &[A], f: F) -> Vec<B>
    where
        A: Sync,
        B: Send,
        F: Fn(&A) -> B + Send + Sync,
    {
        items.iter().map(f).collect()
    }

    fn tabulate<B, F>(&self, n: usize, f: F) -> Vec<B>
    where
        B: Send,
        F: Fn(usize) -> B + Send + Sync,
    {
        (0..n).map(f).collect()
    }

    fn scan<M: Monoid>(&self, monoid: &M, values: &[M::Elem]) -> Vec<M::Elem> {
        scan_slice(monoid, values)
    }

    fn reduce<M: Monoid>(&self, monoid: &M, values: &[M::Elem]) -> M::Elem {
        fold_slice(monoid, values)
    }

    fn scatter<T>(&self, dest: &[T], indices: &[Option<usize>], values: &[T]) -> Result<Vec<T>>
    where
        T: Clone + Send + Sync,
    {
        check_shape("scatter", indices.len(), values.len())?;

        let mut out = dest.to_vec();
        for (index, value) in indices.iter().zip(values) {
            if let Some(slot) = index.and_then(|i| out.get_mut(i)) {
                *slot = value.clone();
            }
        }
        Ok(out)
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}

/// Inclusive scan of one slice
pub(crate) fn scan_slice<M: Monoid>(monoid: &M, values: &[M::Elem]) -> Vec<M::Elem> {
    let mut out = Vec::with_capacity(values.len());
    let mut acc = monoid.identity();
    for value in values {
        acc = monoid.combine(&acc, value);
        out.push(acc.clone());
    }
    out
}

/// Left fold of one slice
pub(crate) fn fold_slice<M: Monoid>(monoid: &M, values: &[M::Elem]) -> M::Elem {
    values
        .iter()
        .fold(monoid.identity(), |acc, value| monoid.combine(&acc, value))
}
