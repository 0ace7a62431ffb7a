//! Comparison Ranking
//!
//! Ranks the measured summaries of a comparison batch by mean runtime.
//! The fastest case is tracked as an `Option` and only populated once a
//! summary has actually been recorded.

use crate::summary::BenchSummary;
use serde::{Deserialize, Serialize};

/// How much slower one case is than the fastest case of its batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowDown {
    /// Index of the case within the batch
    pub index: usize,
    /// `case.mean / fastest.mean`
    pub factor: f64,
}

/// Result of ranking a comparison batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    /// Index of the fastest case within the batch
    pub fastest: usize,
    /// Mean runtime of the fastest case in seconds
    pub fastest_mean: f64,
    /// Slow-down factors for every other case, in batch order
    pub slow_downs: Vec<SlowDown>,
}

/// Incrementally tracks the fastest summary of a batch.
#[derive(Debug, Clone, Default)]
pub struct RankTracker {
    summaries: Vec<BenchSummary>,
    fastest: Option<usize>,
}

impl RankTracker {
    /// Create a tracker sized for `capacity` cases
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            summaries: Vec::with_capacity(capacity),
            fastest: None,
        }
    }

    /// Record the next completed summary. Ties keep the earlier case.
    pub fn record(&mut self, summary: BenchSummary) {
        let index = self.summaries.len();
        let is_faster = match self.fastest {
            None => true,
            Some(current) => summary.mean < self.summaries[current].mean,
        };
        self.summaries.push(summary);
        if is_faster {
            self.fastest = Some(index);
        }
    }

    /// Index of the fastest recorded case, if any
    pub fn fastest(&self) -> Option<usize> {
        self.fastest
    }

    /// Produce the ranking, or `None` when nothing was recorded
    pub fn ranking(&self) -> Option<Ranking> {
        let fastest = self.fastest?;
        let fastest_mean = self.summaries[fastest].mean;

        let slow_downs = self
            .summaries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != fastest)
            .map(|(index, s)| SlowDown {
                index,
                factor: slow_down(s.mean, fastest_mean),
            })
            .collect();

        Some(Ranking {
            fastest,
            fastest_mean,
            slow_downs,
        })
    }

    /// Consume the tracker, returning summaries and ranking
    pub fn finish(self) -> (Vec<BenchSummary>, Option<Ranking>) {
        let ranking = self.ranking();
        (self.summaries, ranking)
    }
}

/// Rank a complete batch of summaries
pub fn rank_summaries(summaries: &[BenchSummary]) -> Option<Ranking> {
    let mut tracker = RankTracker::with_capacity(summaries.len());
    for summary in summaries {
        tracker.record(*summary);
    }
    tracker.ranking()
}

/// `mean / fastest_mean`; a zero fastest mean yields 1.0 for another zero
/// mean and infinity otherwise.
fn slow_down(mean: f64, fastest_mean: f64) -> f64 {
    if fastest_mean == 0.0 {
        if mean == 0.0 { 1.0 } else { f64::INFINITY }
    } else {
        mean / fastest_mean
    }
}
