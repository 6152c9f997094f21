//! Sieve of Eratosthenes driven by [`expand`]
//!
//! The sieve grows its prime list in rounds. A round covering the window
//! `[c, c2)` needs, for every prime `p` found so far, all multiples of `p`
//! up to `c2`. The number of multiples differs per prime, which is exactly
//! the irregular nested parallelism `expand` flattens:
//!
//! - `sz(p) = (c2 - p) / p`
//! - `get(p, i) = (2 + i) * p`
//!
//! Multiples are turned into window offsets and scattered as zeros over a
//! window of ones. Offsets before the window or past its end are dropped by
//! the scatter. Whatever keeps its one is prime. Windows grow quadratically
//! (`c2 = c * c`) until they reach `n + 1`.

use crate::{
    error::Result,
    expand::expand,
    flat::{ops::filter, ops::replicate, Executor},
};

/// All primes `p` with `2 <= p <= n`, in increasing order
pub fn primes<E: Executor>(exec: &E, n: i64) -> Result<Vec<i64>> {
    let bound = n.saturating_add(1);
    let mut acc: Vec<i64> = Vec::new();
    let mut c: i64 = 2;

    while c < bound {
        let c2 = c.checked_mul(c).map_or(bound, |square| square.min(bound));
        let window = (c2 - c) as usize;

        let multiples = expand(
            exec,
            |&p: &i64| ((c2 - p) / p) as usize,
            |&p, i| (2 + i as i64) * p,
            &acc,
        )?;
        let offsets = exec.map(&multiples, |&m| usize::try_from(m - c).ok());

        let marks = exec.scatter(
            &replicate(exec, window, 1i64),
            &offsets,
            &replicate(exec, multiples.len(), 0i64),
        )?;
        let survivors = exec.tabulate(window, |k| marks[k] * (c + k as i64));
        let found = filter(exec, &survivors, |&x| x > 0)?;

        log::debug!(
            "sieve round [{}, {}): {} multiples struck, {} primes found",
            c,
            c2,
            multiples.len(),
            found.len()
        );

        acc.extend(found);
        c = c2;
    }

    Ok(acc)
}

/// Number of primes `p` with `2 <= p <= n`
pub fn prime_count<E: Executor>(exec: &E, n: i64) -> Result<usize> {
    Ok(primes(exec, n)?.len())
}
