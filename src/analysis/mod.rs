//! Analysis modules.
//!
//! Aggregation of the corpus and ranking helpers over the result.

pub mod aggregator;
pub mod stats;

pub use aggregator::*;
pub use stats::*;
