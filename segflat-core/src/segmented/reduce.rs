//! Segmented reduction: one result per segment

use crate::{
    error::{check_shape, Result, SegError},
    flat::{ops::replicate, Executor},
    monoid::{Monoid, Sum},
    segmented::scan::segmented_scan,
};

/// Reduce every segment to a single value, in segment order
///
/// After a segmented scan the last element of each segment holds that
/// segment's full reduction. Segment ends are found by looking one position
/// ahead (`flags[(i + 1) mod n]`), numbered with a prefix sum, and the
/// matching scan results are scattered into a result array of one slot per
/// segment.
///
/// # Preconditions
/// - `flags[0]` must be `true`. The look-ahead for the last element wraps
///   around to `flags[0]`; with a leading `false` the final segment has no
///   end marker and its result is silently dropped.
/// - Inputs of length one produce no segments, even though that single
///   element forms a complete segment. The segment count is only read from
///   the prefix sum when `n > 1`.
///
/// With a strict executor a leading `false` flag is rejected instead.
///
/// # Errors
/// - [`SegError::ShapeMismatch`] if `flags` and `values` differ in length
/// - [`SegError::InvalidInput`] under a strict executor when `flags[0]` is
///   `false`
pub fn segmented_reduce<E, M>(
    exec: &E,
    monoid: &M,
    flags: &[bool],
    values: &[M::Elem],
) -> Result<Vec<M::Elem>>
where
    E: Executor,
    M: Monoid,
{
    check_shape("segmented_reduce", flags.len(), values.len())?;

    let n = flags.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if exec.strict() && !flags[0] {
        return Err(SegError::InvalidInput {
            operation: "segmented_reduce",
            reason: "the first flag must start a segment".to_string(),
        });
    }

    let scanned = segmented_scan(exec, monoid, flags, values)?;

    let ends = exec.tabulate(n, |i| flags[(i + 1) % n]);
    let end_counts = exec.map(&ends, |&end| usize::from(end));
    let offsets = exec.scan(&Sum::<usize>::new(), &end_counts);

    let num_segments = if n > 1 { offsets[n - 1] } else { 0 };
    log::trace!("segmented_reduce: {} elements, {} segments", n, num_segments);

    let scratch = replicate(exec, num_segments, monoid.identity());
    let targets = exec.tabulate(n, |i| ends[i].then(|| offsets[i] - 1));

    exec.scatter(&scratch, &targets, &scanned)
}
