//! Report Events
//!
//! The engine reports through a [`ReportSink`]. Per case it emits, for the
//! warmup phase and then the measured phase:
//!
//! ```text
//! PhaseStart ─▶ Progress × n ─▶ PhaseSummary
//! ```
//!
//! Comparison sessions end with a single `BatchSummary`. Test runs emit one
//! `TestResult` per case and a closing `TestSummary`. How events are
//! rendered is up to the sink.

use calibench_stats::{BenchSummary, Ranking};
use serde::{Deserialize, Serialize};

/// Which phase of a case is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseKind {
    /// Preliminary runs used for calibration
    Warmup,
    /// Runs whose statistics are the reported result
    Measured,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseKind::Warmup => write!(f, "warmup"),
            PhaseKind::Measured => write!(f, "measured"),
        }
    }
}

/// Structured progress and result events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Event {
    /// A phase is about to run `total` iterations
    PhaseStart {
        /// Case name
        case: String,
        /// Phase kind
        kind: PhaseKind,
        /// Planned iterations
        total: u64,
    },
    /// `done` of `total` iterations of the current phase have run
    Progress {
        /// Completed iterations
        done: u64,
        /// Planned iterations
        total: u64,
    },
    /// A phase finished and was aggregated
    PhaseSummary {
        /// Case name
        case: String,
        /// Phase kind
        kind: PhaseKind,
        /// Aggregated statistics
        summary: BenchSummary,
    },
    /// A comparison batch finished
    BatchSummary {
        /// Case names in batch order
        cases: Vec<String>,
        /// Measured summaries in batch order
        summaries: Vec<BenchSummary>,
        /// Fastest case and slow-down factors
        ranking: Ranking,
    },
    /// A case ran once as a test
    TestResult {
        /// Case name
        case: String,
        /// Failed checks reported by the case; `0` means it passed
        failures: u32,
    },
    /// A test run finished
    TestSummary {
        /// Cases that passed
        passed: u64,
        /// Cases that failed
        failed: u64,
    },
}

/// Receiver of engine events
pub trait ReportSink {
    /// Handle one event
    fn emit(&mut self, event: Event);
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn emit(&mut self, event: Event) {
        (**self).emit(event)
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn emit(&mut self, event: Event) {
        (**self).emit(event)
    }
}

/// Sink that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn emit(&mut self, _event: Event) {}
}

/// Sink that records every event in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty
    pub fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Phase summaries of the given kind, in emission order
    pub fn summaries(&self, kind: PhaseKind) -> Vec<(&str, &BenchSummary)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::PhaseSummary {
                    case,
                    kind: k,
                    summary,
                } if *k == kind => Some((case.as_str(), summary)),
                _ => None,
            })
            .collect()
    }

    /// The batch summary, if one was emitted
    pub fn batch_summary(&self) -> Option<&Event> {
        self.events
            .iter()
            .find(|e| matches!(e, Event::BatchSummary { .. }))
    }
}

impl ReportSink for EventLog {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}
