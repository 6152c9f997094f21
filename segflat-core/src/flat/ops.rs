//! Derived flat primitives
//!
//! Each helper is expressed through an [`Executor`], so it runs in whatever
//! mode the executor selects.

use crate::{
    error::{check_shape, Result},
    flat::Executor,
    monoid::{Monoid, Sum},
};

/// `[0, 1, ..., n - 1]`
pub fn iota<E: Executor>(exec: &E, n: usize) -> Vec<usize> {
    exec.tabulate(n, |i| i)
}

/// `n` copies of `value`
pub fn replicate<E, T>(exec: &E, n: usize, value: T) -> Vec<T>
where
    E: Executor,
    T: Clone + Send + Sync,
{
    exec.tabulate(n, |_| value.clone())
}

/// Rotate left by `r` positions: `out[i] = items[(i + r) mod n]`
///
/// A negative `r` rotates right, so `rotate(exec, -1, xs)[i] == xs[i - 1]`
/// with wrap-around at position 0.
pub fn rotate<E, T>(exec: &E, r: isize, items: &[T]) -> Vec<T>
where
    E: Executor,
    T: Clone + Send + Sync,
{
    let n = items.len();
    if n == 0 {
        return Vec::new();
    }
    let shift = r.rem_euclid(n as isize) as usize;
    exec.tabulate(n, |i| items[(i + shift) % n].clone())
}

/// Pair up two equal-length arrays
pub fn zip<E, A, B>(exec: &E, left: &[A], right: &[B]) -> Result<Vec<(A, B)>>
where
    E: Executor,
    A: Clone + Send + Sync,
    B: Clone + Send + Sync,
{
    check_shape("zip", left.len(), right.len())?;
    Ok(exec.tabulate(left.len(), |i| (left[i].clone(), right[i].clone())))
}

/// Split an array of pairs into two arrays
pub fn unzip<E, A, B>(exec: &E, pairs: &[(A, B)]) -> (Vec<A>, Vec<B>)
where
    E: Executor,
    A: Clone + Send + Sync,
    B: Clone + Send + Sync,
{
    (
        exec.map(pairs, |(a, _)| a.clone()),
        exec.map(pairs, |(_, b)| b.clone()),
    )
}

/// Exclusive scan: `out[i] = values[0] <> ... <> values[i - 1]`, `out[0] = identity`
pub fn exclusive_scan<E: Executor, M: Monoid>(
    exec: &E,
    monoid: &M,
    values: &[M::Elem],
) -> Vec<M::Elem> {
    let inclusive = exec.scan(monoid, values);
    exec.tabulate(values.len(), |i| match i {
        0 => monoid.identity(),
        _ => inclusive[i - 1].clone(),
    })
}

/// Keep the elements satisfying `pred`, in order
///
/// Stream compaction: flag survivors, exclusive-scan the flags into target
/// positions, then scatter.
pub fn filter<E, T, P>(exec: &E, items: &[T], pred: P) -> Result<Vec<T>>
where
    E: Executor,
    T: Clone + Send + Sync,
    P: Fn(&T) -> bool + Send + Sync,
{
    let keep = exec.map(items, |item| usize::from(pred(item)));
    let positions = exclusive_scan(exec, &Sum::<usize>::new(), &keep);
    let count = match (positions.last(), keep.last()) {
        (Some(position), Some(kept)) => position + kept,
        _ => 0,
    };
    let targets = exec.tabulate(items.len(), |i| (keep[i] == 1).then_some(positions[i]));

    // Every slot of the scratch buffer is overwritten; its contents are placeholders.
    exec.scatter(&items[..count], &targets, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat::SequentialExecutor;

    #[test]
    fn test_iota_and_replicate() {
        assert_eq!(iota(&SequentialExecutor, 4), vec![0, 1, 2, 3]);
        assert_eq!(replicate(&SequentialExecutor, 3, 'x'), vec!['x', 'x', 'x']);
        assert!(iota(&SequentialExecutor, 0).is_empty());
    }

    #[test]
    fn test_rotate_right_by_one() {
        assert_eq!(
            rotate(&SequentialExecutor, -1, &[0, 0, 1, 1, 1, 2]),
            vec![2, 0, 0, 1, 1, 1]
        );
    }

    #[test]
    fn test_rotate_wraps_large_shift() {
        assert_eq!(rotate(&SequentialExecutor, 5, &[1, 2, 3]), vec![3, 1, 2]);
        assert!(rotate::<_, i32>(&SequentialExecutor, 1, &[]).is_empty());
    }

    #[test]
    fn test_zip_shape_mismatch() {
        assert!(zip(&SequentialExecutor, &[1, 2], &[true]).is_err());
        let pairs = zip(&SequentialExecutor, &[1, 2], &[true, false]).unwrap();
        assert_eq!(pairs, vec![(1, true), (2, false)]);
        assert_eq!(
            unzip(&SequentialExecutor, &pairs),
            (vec![1, 2], vec![true, false])
        );
    }

    #[test]
    fn test_exclusive_scan() {
        let out = exclusive_scan(&SequentialExecutor, &Sum::<i32>::new(), &[3, 1, 4, 1]);
        assert_eq!(out, vec![0, 3, 4, 8]);
    }

    #[test]
    fn test_filter_keeps_order() {
        let out = filter(&SequentialExecutor, &[5, 0, 3, 0, 0, 9], |x| *x > 0).unwrap();
        assert_eq!(out, vec![5, 3, 9]);
    }

    #[test]
    fn test_filter_nothing_survives() {
        let out = filter(&SequentialExecutor, &[1, 2, 3], |_| false).unwrap();
        assert!(out.is_empty());
        let out = filter::<_, i32, _>(&SequentialExecutor, &[], |_| true).unwrap();
        assert!(out.is_empty());
    }
}
