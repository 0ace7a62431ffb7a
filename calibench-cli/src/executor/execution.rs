//! Session Execution
//!
//! Drives every registered case through calibration and measurement, one
//! case at a time, in registration order.
//!
//! ## Data Flow
//!
//! ```text
//! CaseRegistry
//!      │  (one case at a time)
//!      ▼
//! ┌────────────┐   ┌─────────────┐   ┌─────────────┐
//! │ calibrate  │──▶│  run_phase  │──▶│ BenchSummary│
//! │ (warmup)   │   │ (measured)  │   └──────┬──────┘
//! └────────────┘   └─────────────┘          │
//!                                           ▼
//!                         RankTracker (compare mode only)
//!                                           │
//!                                           ▼
//!                                 Event::BatchSummary
//! ```
//!
//! In compare mode the first case whose measured phase reports a failure
//! aborts the batch: later cases are not measured and no ranking is emitted.
//! Outside compare mode every case is always measured.

use calibench_core::{
    BenchCase, BenchConfig, CaseRegistry, Event, PhaseKind, ReportSink, calibrate, run_phase,
    terminate,
};
use calibench_stats::{BenchSummary, RankTracker, Ranking};
use serde::Serialize;

/// Result of one case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseOutcome {
    /// Case name
    pub name: String,
    /// Measured iterations that were run
    pub n_runs: u64,
    /// Warmup statistics (informational)
    pub warmup: BenchSummary,
    /// Measured statistics; the reported result
    pub measured: BenchSummary,
}

/// Result of a whole session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionOutcome {
    /// Cases that were measured, in registration order
    pub cases: Vec<CaseOutcome>,
    /// Ranking of a completed comparison batch
    pub ranking: Option<Ranking>,
    /// Whether comparison mode was active
    pub compared: bool,
    /// Whether a failing case cut the comparison batch short
    pub aborted: bool,
}

impl SessionOutcome {
    /// Number of measured cases that reported at least one failed iteration
    pub fn failure_count(&self) -> u64 {
        self.cases.iter().filter(|c| c.measured.has_failed).count() as u64
    }

    /// Whether every case ran without failures
    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }

    /// Failure count clamped to a process exit status
    pub fn exit_code(&self) -> i32 {
        self.failure_count().min(255) as i32
    }

    /// Fastest case of a ranked comparison batch
    pub fn fastest(&self) -> Option<&CaseOutcome> {
        self.ranking.as_ref().and_then(|r| self.cases.get(r.fastest))
    }
}

/// Executes a registry against one configuration and sink
pub struct Executor<'s> {
    config: BenchConfig,
    sink: &'s mut dyn ReportSink,
}

impl<'s> Executor<'s> {
    /// Create an executor; unset configuration fields are defaulted here.
    pub fn new(config: &BenchConfig, sink: &'s mut dyn ReportSink) -> Self {
        Self {
            config: config.resolved(),
            sink,
        }
    }

    /// Resolved configuration used by this executor
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Run every case of `registry`
    pub fn execute(&mut self, registry: &CaseRegistry) -> SessionOutcome {
        let compare = self.config.compare && registry.len() > 1;
        let mut tracker = compare.then(|| RankTracker::with_capacity(registry.len()));
        let mut cases = Vec::with_capacity(registry.len());
        let mut aborted = false;

        tracing::info!(
            cases = registry.len(),
            compare,
            fixed_runs = self.config.n_runs_fixed,
            "starting session"
        );

        for case in registry {
            let outcome = self.execute_single(case);
            let failed = outcome.measured.has_failed;

            if let Some(tracker) = tracker.as_mut() {
                if failed {
                    tracing::warn!(
                        case = %outcome.name,
                        failed = outcome.measured.failed_count,
                        remaining = registry.len() - cases.len() - 1,
                        "case failed, aborting comparison batch"
                    );
                    cases.push(outcome);
                    aborted = true;
                    break;
                }
                tracker.record(outcome.measured);
                if tracker.fastest() == Some(cases.len()) {
                    tracing::debug!(
                        case = %outcome.name,
                        mean = outcome.measured.mean,
                        "new fastest case"
                    );
                }
            }
            cases.push(outcome);
        }

        let ranking = match tracker {
            Some(tracker) if !aborted => {
                let (summaries, ranking) = tracker.finish();
                if let Some(ranking) = &ranking {
                    self.sink.emit(Event::BatchSummary {
                        cases: cases.iter().map(|c| c.name.clone()).collect(),
                        summaries,
                        ranking: ranking.clone(),
                    });
                }
                ranking
            }
            _ => None,
        };

        let outcome = SessionOutcome {
            cases,
            ranking,
            compared: compare,
            aborted,
        };
        tracing::info!(failures = outcome.failure_count(), "session complete");
        outcome
    }

    /// Calibrate and measure one case. Allocation failures are fatal.
    fn execute_single(&mut self, case: &BenchCase) -> CaseOutcome {
        let calibration = calibrate(case, &self.config, &mut *self.sink)
            .unwrap_or_else(|e| terminate(&e));

        let measured = run_phase(
            case,
            PhaseKind::Measured,
            calibration.n_runs,
            &mut *self.sink,
        )
        .unwrap_or_else(|e| terminate(&e));

        CaseOutcome {
            name: case.name().to_string(),
            n_runs: calibration.n_runs,
            warmup: calibration.warmup,
            measured,
        }
    }
}

/// Run a session: calibrate and measure every case, ranking them in
/// compare mode.
pub fn run_session(
    registry: &CaseRegistry,
    config: &BenchConfig,
    sink: &mut dyn ReportSink,
) -> SessionOutcome {
    Executor::new(config, sink).execute(registry)
}
