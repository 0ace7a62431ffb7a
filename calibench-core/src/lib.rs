#![warn(missing_docs)]
//! Calibench Core - Measurement Runtime
//!
//! This crate provides the single-threaded measurement engine:
//! - `CaseRegistry` of named zero-argument callables
//! - Monotonic `Timer` around each invocation
//! - Warmup-driven calibration of the measured iteration count
//! - The fail-soft measurement loop (`Bencher`, `run_phase`)
//! - Structured report events delivered to a `ReportSink`
//! - Pass/fail test runs over the same registry (`check`)

mod alloc;
mod bencher;
mod calibrate;
pub mod check;
mod config;
mod events;
mod measure;
mod registry;

pub use alloc::{AllocationError, terminate};
pub use bencher::{Bencher, run_phase};
pub use calibrate::{Calibration, calibrate, derive_run_count};
pub use check::run_tests;
pub use config::{
    BenchConfig, DEFAULT_MAX_BENCH_TIME, DEFAULT_MAX_RUNS, DEFAULT_MIN_RUNS, DEFAULT_WARMUP_RUNS,
};
pub use events::{Event, EventLog, NullSink, PhaseKind, ReportSink};
pub use measure::{Instant, Timer, time_call};
pub use registry::{BenchCase, BenchFn, CaseRegistry, RegistryError};
