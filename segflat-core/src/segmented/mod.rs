//! Segmented array primitives
//!
//! A segmented array is a value array paired with a flag array of the same
//! length, where `flags[i] == true` starts a new segment at `i`. By
//! convention the first element always starts a segment.

pub mod iota;
pub mod reduce;
pub mod scan;

pub use iota::{replicated_iota, segmented_iota};
pub use reduce::segmented_reduce;
pub use scan::segmented_scan;
