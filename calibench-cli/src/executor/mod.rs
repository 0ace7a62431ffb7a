//! Benchmark Executor
//!
//! Runs a case registry and renders the resulting events.
//!
//! ## Pipeline Overview
//!
//! ```text
//! CaseRegistry (built by the caller)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Calibrate, measure, rank
//! └──────┬──────┘
//!        │ Event stream
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable terminal output
//! │    json     │  JSON Lines
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Session orchestration and compare-mode short-circuit
//! - [`formatting`] - Human-readable output sink
//! - [`json`] - JSON Lines output sink

mod execution;
mod formatting;
mod json;

pub use execution::{CaseOutcome, Executor, SessionOutcome, run_session};
pub use formatting::{HumanSink, format_comparison, format_duration, format_summary_line};
pub use json::{JsonSink, SCHEMA_VERSION};
