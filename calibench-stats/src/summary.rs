//! Summary Statistics
//!
//! Reduces the samples of one phase (warmup or measured) into a
//! [`BenchSummary`]. The same reduction is used for both phases.

use serde::{Deserialize, Serialize};

/// One timed invocation of a benchmarked callable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSample {
    /// Wall-clock time of the invocation in seconds
    pub elapsed: f64,
    /// Whether the callable reported a failure (returned a positive count)
    pub failed: bool,
}

impl RunSample {
    /// Build a sample from an elapsed time and the callable's return value
    pub fn new(elapsed: f64, failures: u32) -> Self {
        Self {
            elapsed,
            failed: failures > 0,
        }
    }
}

/// Aggregated statistics for one phase of one case
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BenchSummary {
    /// At least one iteration failed
    pub has_failed: bool,
    /// Arithmetic mean of elapsed seconds
    pub mean: f64,
    /// Fastest iteration in seconds
    pub min: f64,
    /// Slowest iteration in seconds
    pub max: f64,
    /// Sample variance (n - 1 denominator), 0 for a single sample
    pub variance: f64,
    /// Number of failed iterations
    pub failed_count: u64,
    /// Number of samples aggregated
    pub sample_count: u64,
}

impl BenchSummary {
    /// Sample standard deviation in seconds
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Coefficient of variation as a percentage of the mean
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            (self.std_dev() / self.mean) * 100.0
        }
    }
}

/// Compute summary statistics for a phase.
///
/// An empty slice yields an all-zero summary. A single sample has a variance
/// of exactly 0 instead of dividing by zero.
pub fn compute_summary(samples: &[RunSample]) -> BenchSummary {
    if samples.is_empty() {
        return BenchSummary::default();
    }

    let n = samples.len();
    let sum: f64 = samples.iter().map(|s| s.elapsed).sum();

    let min = samples
        .iter()
        .map(|s| s.elapsed)
        .fold(f64::INFINITY, f64::min);
    let max = samples
        .iter()
        .map(|s| s.elapsed)
        .fold(f64::NEG_INFINITY, f64::max);

    // Rounding in the sum can push the mean of identical samples past them.
    let mean = (sum / n as f64).clamp(min, max);

    let variance = if n < 2 {
        0.0
    } else {
        samples
            .iter()
            .map(|s| (s.elapsed - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64
    };

    let failed_count = samples.iter().filter(|s| s.failed).count() as u64;

    BenchSummary {
        has_failed: failed_count > 0,
        mean,
        min,
        max,
        variance,
        failed_count,
        sample_count: n as u64,
    }
}
