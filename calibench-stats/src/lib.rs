#![warn(missing_docs)]
//! Calibench Statistical Engine
//!
//! Reduces raw timing samples into per-phase summaries and ranks the
//! summaries of a comparison batch:
//! - Mean, min, max and sample variance with explicit small-sample guards
//! - Failure tallies carried alongside the timing data
//! - Fastest-case selection and slow-down factors

mod comparison;
mod summary;

pub use comparison::{RankTracker, Ranking, SlowDown, rank_summaries};
pub use summary::{BenchSummary, RunSample, compute_summary};
