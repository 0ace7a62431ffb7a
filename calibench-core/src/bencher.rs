//! Bencher - The Measurement Loop
//!
//! Runs a callable a fixed number of times, timing each invocation and
//! recording one [`RunSample`] per iteration. Iterations are fail-soft: a
//! positive return value marks the sample as failed but never stops the
//! loop. A `Bencher` is consumed by [`Bencher::finish`], so a phase cannot
//! be restarted in place.

use crate::alloc::AllocationError;
use crate::events::{Event, PhaseKind, ReportSink};
use crate::measure::time_call;
use crate::registry::BenchCase;
use calibench_stats::{BenchSummary, RunSample, compute_summary};

/// Collects samples for one phase of one case
pub struct Bencher {
    target: u64,
    samples: Vec<RunSample>,
}

impl Bencher {
    /// Reserve storage for `target` samples up front.
    pub fn new(target: u64) -> Result<Self, AllocationError> {
        let capacity = usize::try_from(target)
            .map_err(|_| AllocationError::SampleCountOverflow { requested: target })?;

        let mut samples = Vec::new();
        samples
            .try_reserve_exact(capacity)
            .map_err(|source| AllocationError::Samples {
                requested: target,
                source,
            })?;

        Ok(Self { target, samples })
    }

    /// Time one invocation of `f` and record it
    #[inline]
    pub fn iter<F>(&mut self, f: F) -> RunSample
    where
        F: FnOnce() -> u32,
    {
        let (elapsed, failures) = time_call(f);
        let sample = RunSample::new(elapsed, failures);
        self.samples.push(sample);
        sample
    }

    /// Whether the planned number of samples has been recorded
    pub fn has_enough_samples(&self) -> bool {
        self.samples.len() as u64 >= self.target
    }

    /// Samples recorded so far
    pub fn samples(&self) -> &[RunSample] {
        &self.samples
    }

    /// Aggregate the samples and release the buffer
    pub fn finish(self) -> BenchSummary {
        compute_summary(&self.samples)
    }
}

/// Run one phase of `case`: exactly `n_runs` timed invocations.
///
/// Emits `PhaseStart`, one `Progress` per iteration and `PhaseSummary`.
pub fn run_phase(
    case: &BenchCase,
    kind: PhaseKind,
    n_runs: u64,
    sink: &mut dyn ReportSink,
) -> Result<BenchSummary, AllocationError> {
    let mut bencher = Bencher::new(n_runs)?;

    sink.emit(Event::PhaseStart {
        case: case.name().to_string(),
        kind,
        total: n_runs,
    });

    let mut done = 0u64;
    while !bencher.has_enough_samples() {
        let sample = bencher.iter(|| case.call());
        done += 1;
        if sample.failed {
            tracing::trace!(case = case.name(), %kind, iteration = done, "iteration failed");
        }
        sink.emit(Event::Progress {
            done,
            total: n_runs,
        });
    }

    let summary = bencher.finish();
    tracing::debug!(
        case = case.name(),
        %kind,
        runs = n_runs,
        mean = summary.mean,
        failed = summary.failed_count,
        "phase complete"
    );

    sink.emit(Event::PhaseSummary {
        case: case.name().to_string(),
        kind,
        summary,
    });

    Ok(summary)
}
