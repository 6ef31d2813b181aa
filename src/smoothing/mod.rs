//! Series smoothing.
//!
//! Moving averages are computed from a prefix sum in O(n) regardless of
//! window size, then re-attached to the ordinal at the middle of each window.

mod moving_average;

pub use moving_average::{aligned_ordinals, moving_average, moving_average_values};
