//! Session Configuration
//!
//! Zero-valued fields mean "unset" and are replaced by defaults when a
//! session starts. A fixed run count overrides the min/max bounds.

use serde::{Deserialize, Serialize};

/// Default number of warmup iterations
pub const DEFAULT_WARMUP_RUNS: u64 = 10;
/// Default lower bound for measured iterations
pub const DEFAULT_MIN_RUNS: u64 = 10;
/// Default upper bound for measured iterations
pub const DEFAULT_MAX_RUNS: u64 = 100;
/// Default time budget per case in seconds
pub const DEFAULT_MAX_BENCH_TIME: f64 = 10.0;

/// Configuration for one benchmarking session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Warmup iterations used to estimate per-call cost
    pub n_warmup: u64,
    /// Lower bound for measured iterations
    pub min_runs: u64,
    /// Upper bound for measured iterations
    pub max_runs: u64,
    /// Fixed measured iteration count; overrides calibration when non-zero
    pub n_runs_fixed: u64,
    /// Time budget per case in seconds; informs calibration only
    pub max_bench_time: f64,
    /// Rank cases against each other when more than one is registered
    pub compare: bool,
    /// Colored human-readable output
    pub color: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            n_warmup: 0,
            min_runs: 0,
            max_runs: 0,
            n_runs_fixed: 0,
            max_bench_time: 0.0,
            compare: false,
            color: true,
        }
    }
}

impl BenchConfig {
    /// Fill unset fields with defaults and apply the fixed-run override.
    ///
    /// A `max_bench_time` that is not a positive finite number counts as
    /// unset. If `min_runs` ends up above `max_runs`, `max_runs` is raised to
    /// match so calibration never drops below the configured floor.
    pub fn resolved(&self) -> BenchConfig {
        let mut cfg = *self;

        if cfg.n_warmup == 0 {
            cfg.n_warmup = DEFAULT_WARMUP_RUNS;
        }
        if !(cfg.max_bench_time.is_finite() && cfg.max_bench_time > 0.0) {
            cfg.max_bench_time = DEFAULT_MAX_BENCH_TIME;
        }

        if cfg.n_runs_fixed > 0 {
            cfg.min_runs = cfg.n_runs_fixed;
            cfg.max_runs = cfg.n_runs_fixed;
            return cfg;
        }

        if cfg.min_runs == 0 {
            cfg.min_runs = DEFAULT_MIN_RUNS;
        }
        if cfg.max_runs == 0 {
            cfg.max_runs = DEFAULT_MAX_RUNS;
        }
        cfg.max_runs = cfg.max_runs.max(cfg.min_runs);
        cfg
    }

    /// Whether the measured iteration count is fixed
    pub fn is_fixed(&self) -> bool {
        self.n_runs_fixed > 0
    }

    /// Builder: set warmup iterations
    pub fn with_warmup(mut self, n: u64) -> Self {
        self.n_warmup = n;
        self
    }

    /// Builder: set min/max measured iterations
    pub fn with_run_bounds(mut self, min_runs: u64, max_runs: u64) -> Self {
        self.min_runs = min_runs;
        self.max_runs = max_runs;
        self
    }

    /// Builder: fix the measured iteration count
    pub fn with_fixed_runs(mut self, n: u64) -> Self {
        self.n_runs_fixed = n;
        self
    }

    /// Builder: set the per-case time budget in seconds
    pub fn with_max_bench_time(mut self, seconds: f64) -> Self {
        self.max_bench_time = seconds;
        self
    }

    /// Builder: enable or disable comparison mode
    pub fn with_compare(mut self, compare: bool) -> Self {
        self.compare = compare;
        self
    }

    /// Builder: enable or disable colored output
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}
