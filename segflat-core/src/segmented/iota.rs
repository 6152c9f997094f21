//! Index-generating segmented primitives

use crate::{
    error::Result,
    flat::{
        ops::{iota, replicate},
        Executor,
    },
    monoid::Sum,
    segmented::scan::segmented_scan,
};

/// Repeat each index `i` exactly `reps[i]` times, in order
///
/// `replicated_iota([2, 3, 1]) == [0, 0, 1, 1, 1, 2]`.
///
/// Each index is scattered to the first output position of its block and
/// then propagated forward with a segmented sum scan. Index 0 is never
/// flagged as a segment start, but the value being carried in its block is
/// 0 anyway. An index with zero repetitions writes to the same position as
/// its successor and is overwritten, or falls past the end and is dropped.
pub fn replicated_iota<E: Executor>(exec: &E, reps: &[usize]) -> Result<Vec<usize>> {
    let sum = Sum::<usize>::new();
    let totals = exec.scan(&sum, reps);
    let len = totals.last().copied().unwrap_or(0);

    let starts = exec.tabulate(reps.len(), |i| match i {
        0 => Some(0),
        _ => Some(totals[i - 1]),
    });
    let markers = exec.scatter(&replicate(exec, len, 0), &starts, &iota(exec, reps.len()))?;
    let flags = exec.map(&markers, |&marker| marker > 0);

    log::trace!("replicated_iota: {} counts, {} outputs", reps.len(), len);

    segmented_scan(exec, &sum, &flags, &markers)
}

/// Position of every element within its segment
///
/// `segmented_iota([F, F, F, T, F, F, F]) == [0, 1, 2, 0, 1, 2, 3]`.
pub fn segmented_iota<E: Executor>(exec: &E, flags: &[bool]) -> Result<Vec<usize>> {
    let ones = replicate(exec, flags.len(), 1usize);
    let counts = segmented_scan(exec, &Sum::<usize>::new(), flags, &ones)?;
    Ok(exec.map(&counts, |&count| count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat::SequentialExecutor;

    #[test]
    fn test_replicated_iota() {
        let out = replicated_iota(&SequentialExecutor, &[2, 3, 1]).unwrap();
        assert_eq!(out, vec![0, 0, 1, 1, 1, 2]);
    }

    #[test]
    fn test_replicated_iota_zero_counts() {
        assert_eq!(
            replicated_iota(&SequentialExecutor, &[0, 2, 0, 1]).unwrap(),
            vec![1, 1, 3]
        );
        assert_eq!(
            replicated_iota(&SequentialExecutor, &[2, 0]).unwrap(),
            vec![0, 0]
        );
        assert_eq!(
            replicated_iota(&SequentialExecutor, &[0, 0, 3]).unwrap(),
            vec![2, 2, 2]
        );
    }

    #[test]
    fn test_replicated_iota_empty() {
        assert!(replicated_iota(&SequentialExecutor, &[]).unwrap().is_empty());
        assert!(replicated_iota(&SequentialExecutor, &[0, 0]).unwrap().is_empty());
    }

    #[test]
    fn test_segmented_iota() {
        let out = segmented_iota(
            &SequentialExecutor,
            &[false, false, false, true, false, false, false],
        )
        .unwrap();
        assert_eq!(out, vec![0, 1, 2, 0, 1, 2, 3]);
    }

    #[test]
    fn test_segmented_iota_all_starts() {
        let out = segmented_iota(&SequentialExecutor, &[true, true, true]).unwrap();
        assert_eq!(out, vec![0, 0, 0]);
    }

    #[test]
    fn test_segmented_iota_empty() {
        assert!(segmented_iota(&SequentialExecutor, &[]).unwrap().is_empty());
    }
}
