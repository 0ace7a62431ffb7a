#![warn(missing_docs)]
//! # Calibench
//!
//! In-process micro-benchmark driver with adaptive calibration and
//! comparison ranking.
//!
//! - **Calibration**: a warmup phase estimates per-call cost and sizes the
//!   measured phase to fit a time budget, bounded by `min_runs`/`max_runs`
//! - **Fail-soft measurement**: a callable returns its failure count; failed
//!   iterations are tallied, never fatal to the loop
//! - **Statistics**: mean, min, max and sample variance per phase
//! - **Compare mode**: rank several cases by mean runtime; a failing case
//!   aborts the rest of the batch
//! - **Test runs**: the same cases can run once as pass/fail tests using the
//!   `check` helpers
//! - **Structured events**: progress and summaries go to a `ReportSink`
//!   (terminal, JSON Lines, or your own)
//!
//! ## Quick Start
//!
//! ```ignore
//! use calibench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let registry = CaseRegistry::new()
//!         .with("sum_1k", || {
//!             std::hint::black_box((0..1_000u64).sum::<u64>());
//!             0
//!         })?
//!         .with("sum_10k", || {
//!             std::hint::black_box((0..10_000u64).sum::<u64>());
//!             0
//!         })?;
//!     std::process::exit(calibench::run(registry)?);
//! }
//! ```
//!
//! ## Without the CLI
//!
//! ```ignore
//! let config = BenchConfig::default().with_fixed_runs(6).with_compare(true);
//! let failed_cases = calibench::run_with_config(&registry, &config);
//! ```

// Re-export core types
pub use calibench_core::{
    AllocationError, BenchCase, BenchConfig, BenchFn, Bencher, Calibration, CaseRegistry, Event,
    EventLog, NullSink, PhaseKind, RegistryError, ReportSink, Timer, calibrate, check,
    derive_run_count, run_phase, run_tests,
};

// Re-export stats
pub use calibench_stats::{
    BenchSummary, RankTracker, Ranking, RunSample, SlowDown, compute_summary, rank_summaries,
};

// Re-export the executor and sinks
pub use calibench_cli::{
    CalibenchConfig, CaseOutcome, Cli, Executor, HumanSink, JsonSink, OutputFormat,
    SessionOutcome, run_session, run_with_cli, run_with_config, run_with_sink,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BenchConfig, BenchSummary, CaseRegistry, Event, EventLog, PhaseKind, ReportSink,
        SessionOutcome, check, run_session, run_tests,
    };
}

/// Run the Calibench CLI harness.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     std::process::exit(calibench::run(registry)?);
/// }
/// ```
pub use calibench_cli::run;
