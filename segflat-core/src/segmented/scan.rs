//! Segmented inclusive scan

use crate::{
    error::{check_shape, Result},
    flat::{ops::zip, Executor},
    monoid::{Monoid, Segmented},
};

/// Inclusive scan that restarts at every segment start
///
/// `out[i]` is the combination of `values[s..=i]`, where `s` is the last
/// index at or before `i` whose flag is set. If no such index exists the
/// run is taken to start at 0, so a leading `false` flag still produces the
/// natural result.
///
/// Runs as a single flat scan over `(flag, value)` pairs with the
/// [`Segmented`] lifting of `monoid`.
///
/// # Errors
/// [`SegError::ShapeMismatch`](crate::SegError::ShapeMismatch) if `flags`
/// and `values` differ in length.
pub fn segmented_scan<E, M>(
    exec: &E,
    monoid: &M,
    flags: &[bool],
    values: &[M::Elem],
) -> Result<Vec<M::Elem>>
where
    E: Executor,
    M: Monoid,
{
    check_shape("segmented_scan", flags.len(), values.len())?;

    let pairs = zip(exec, flags, values)?;
    let scanned = exec.scan(&Segmented::new(monoid), &pairs);
    Ok(exec.map(&scanned, |(_, value)| value.clone()))
}
