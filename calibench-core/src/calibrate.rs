//! Calibration
//!
//! Runs the warmup phase and converts its mean iteration time and the
//! configured time budget into the number of measured iterations:
//!
//! ```text
//! n_runs_fixed > 0             → n_runs_fixed
//! mean_warmup > max_bench_time → max_runs
//! mean_warmup == 0             → max_runs
//! otherwise                    → floor(max_bench_time / mean_warmup),
//!                                clamped into [min_runs, max_runs]
//! ```

use crate::alloc::AllocationError;
use crate::bencher::run_phase;
use crate::config::BenchConfig;
use crate::events::{PhaseKind, ReportSink};
use crate::registry::BenchCase;
use calibench_stats::BenchSummary;

/// Outcome of the warmup phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Number of measured iterations to run
    pub n_runs: u64,
    /// Warmup statistics; informational only
    pub warmup: BenchSummary,
}

/// Derive the measured iteration count from a warmup mean in seconds.
///
/// `config` is resolved first, so unset fields use their defaults.
pub fn derive_run_count(mean_warmup: f64, config: &BenchConfig) -> u64 {
    let cfg = config.resolved();

    if cfg.is_fixed() {
        return cfg.n_runs_fixed;
    }
    if mean_warmup > cfg.max_bench_time {
        return cfg.max_runs;
    }
    // Instantaneous callable: no meaningful ratio, run the allowed maximum.
    if mean_warmup <= 0.0 || !mean_warmup.is_finite() {
        return cfg.max_runs;
    }

    let raw = (cfg.max_bench_time / mean_warmup).floor() as u64;
    raw.max(cfg.min_runs).min(cfg.max_runs)
}

/// Run the warmup phase of `case` and derive its measured iteration count
pub fn calibrate(
    case: &BenchCase,
    config: &BenchConfig,
    sink: &mut dyn ReportSink,
) -> Result<Calibration, AllocationError> {
    let cfg = config.resolved();
    let warmup = run_phase(case, PhaseKind::Warmup, cfg.n_warmup, sink)?;
    let n_runs = derive_run_count(warmup.mean, &cfg);

    tracing::debug!(
        case = case.name(),
        mean_warmup = warmup.mean,
        max_bench_time = cfg.max_bench_time,
        fixed = cfg.is_fixed(),
        n_runs,
        "calibrated"
    );

    Ok(Calibration { n_runs, warmup })
}
