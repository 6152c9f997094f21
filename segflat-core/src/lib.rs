//! Segmented array primitives for flattening irregular nested parallelism
//!
//! Irregular nested parallelism appears whenever each element of an array
//! produces a different, data-dependent amount of work. This crate maps
//! such computations onto flat primitives (map, scan, reduce, scatter) that
//! have regular shape and fixed per-element cost, so they can run on any
//! data-parallel executor.
//!
//! # Architecture
//!
//! - **Monoids** ([`monoid`]): associative operators with identities, passed
//!   per call
//! - **Flat layer** ([`flat`]): the [`Executor`] trait with sequential,
//!   parallel (rayon), and adaptive implementations, plus derived helpers
//! - **Segmented layer** ([`segmented`]): segmented scan and reduce,
//!   replicated and segmented iota
//! - **Flattening** ([`expand`]): the combinator that realises a ragged
//!   two-level map as one flat array
//! - **Consumers** ([`sieve`], [`fixture`]): a prime sieve built on
//!   `expand`, and the declarative fixture table used to check everything
//!
//! # Example
//!
//! ```rust
//! use segflat_core::{segmented_reduce, Engine, Sum};
//!
//! let engine = Engine::default();
//! let totals = segmented_reduce(
//!     &engine,
//!     &Sum::<i32>::new(),
//!     &[true, false, false, true, false],
//!     &[1, 2, 3, 4, 5],
//! )
//! .unwrap();
//!
//! assert_eq!(totals, vec![6, 9]);
//! ```

pub mod config;
pub mod error;
pub mod expand;
pub mod fixture;
pub mod flat;
pub mod monoid;
pub mod segmented;
pub mod sieve;

pub use config::EngineConfig;
pub use error::{Result, SegError};
pub use expand::expand;
pub use fixture::{builtin_fixtures, EntryPoint, Fixture, FixtureOutcome, Literal};
#[cfg(feature = "parallel")]
pub use flat::ParallelExecutor;
pub use flat::{auto_select, Engine, ExecutionMode, Executor, SequentialExecutor};
pub use monoid::{All, Any, FnMonoid, Max, Min, Monoid, MonoidExt, Product, Segmented, Sum};
pub use segmented::{replicated_iota, segmented_iota, segmented_reduce, segmented_scan};
pub use sieve::{prime_count, primes};
