//! Flattening of irregular nested maps
//!
//! `expand` turns "each source element produces a data-dependent number of
//! results" into a fixed sequence of flat primitives. Ragged intermediate
//! arrays are never materialized; the nesting is recorded in two flat
//! bookkeeping arrays instead:
//!
//! - `idxs[k]`: which source element output position `k` belongs to
//! - `locals[k]`: the generator index within that source element's run
//!
//! For `sizes = [2, 3, 1]`:
//!
//! ```text
//! idxs   = [0, 0, 1, 1, 1, 2]
//! flags  = [T, F, T, F, F, T]
//! locals = [0, 1, 0, 1, 2, 0]
//! ```

use crate::{
    error::Result,
    flat::{ops::rotate, Executor},
    segmented::{replicated_iota, segmented_iota},
};

/// Concatenate `[get(a, 0), ..., get(a, sz(a) - 1)]` for every `a` in `arr`
///
/// The output has exactly `sum(sz(a))` elements, ordered by source element
/// and then by generator index. `get` is only called with indices below
/// `sz` of the same element.
///
/// ```rust
/// use segflat_core::{expand, SequentialExecutor};
///
/// let out = expand(&SequentialExecutor, |&x: &usize| x, |&x, j| x * j, &[2, 3, 1]).unwrap();
/// assert_eq!(out, vec![0, 2, 0, 3, 6, 0]);
/// ```
pub fn expand<E, A, B, S, G>(exec: &E, sz: S, get: G, arr: &[A]) -> Result<Vec<B>>
where
    E: Executor,
    A: Sync,
    B: Send,
    S: Fn(&A) -> usize + Send + Sync,
    G: Fn(&A, usize) -> B + Send + Sync,
{
    let sizes = exec.map(arr, |a| sz(a));
    let idxs = replicated_iota(exec, &sizes)?;

    // A run starts wherever the owning source element changes. Position 0
    // compares against the last element; when only one source produces
    // output that flag is false, and the scan starts its first run at 0 anyway.
    let previous = rotate(exec, -1, &idxs);
    let flags = exec.tabulate(idxs.len(), |k| idxs[k] != previous[k]);
    let locals = segmented_iota(exec, &flags)?;

    log::trace!("expand: {} sources, {} outputs", arr.len(), idxs.len());

    Ok(exec.tabulate(idxs.len(), |k| get(&arr[idxs[k]], locals[k])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat::SequentialExecutor;

    #[test]
    fn test_expand_scales() {
        let out = expand(
            &SequentialExecutor,
            |&x: &usize| x,
            |&x, j| x * j,
            &[2, 3, 1],
        )
        .unwrap();
        assert_eq!(out, vec![0, 2, 0, 3, 6, 0]);
    }

    #[test]
    fn test_expand_skips_empty_sources() {
        let words = ["ab", "", "c", ""];
        let out = expand(
            &SequentialExecutor,
            |w: &&str| w.len(),
            |w, j| w.as_bytes()[j] as char,
            &words,
        )
        .unwrap();
        assert_eq!(out, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_expand_single_productive_source() {
        // Only one source contributes, so the rotated comparison never flags position 0.
        let out = expand(
            &SequentialExecutor,
            |&n: &usize| n,
            |&n, j| (n, j),
            &[0, 3, 0],
        )
        .unwrap();
        assert_eq!(out, vec![(3, 0), (3, 1), (3, 2)]);
    }

    #[test]
    fn test_expand_empty() {
        let out = expand(&SequentialExecutor, |_: &u8| 4, |&x, _| x, &[]).unwrap();
        assert!(out.is_empty());

        let out = expand(&SequentialExecutor, |_: &u8| 0, |&x, _| x, &[1, 2, 3]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_expand_ranges() {
        let out = expand(
            &SequentialExecutor,
            |&(lo, hi): &(i32, i32)| (hi - lo) as usize,
            |&(lo, _), j| lo + j as i32,
            &[(0, 2), (10, 13), (5, 5), (-1, 0)],
        )
        .unwrap();
        assert_eq!(out, vec![0, 1, 10, 11, 12, -1]);
    }
}
