//! JSON Lines Output
//!
//! Writes one JSON object per engine event. The first line is a session
//! header with a timestamp and the resolved configuration.

use calibench_core::{BenchConfig, Event, ReportSink};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Schema version of the JSON Lines stream
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct SessionHeader<'a> {
    event: &'static str,
    schema_version: u32,
    version: &'static str,
    timestamp: DateTime<Utc>,
    config: &'a BenchConfig,
    cases: &'a [String],
}

/// Sink writing JSON Lines
pub struct JsonSink<W: Write> {
    writer: W,
    progress: bool,
}

impl<W: Write> JsonSink<W> {
    /// Write the session header and return the sink.
    ///
    /// `progress` controls whether per-iteration progress events are written.
    pub fn start(
        mut writer: W,
        config: &BenchConfig,
        cases: &[String],
        progress: bool,
    ) -> Result<Self, serde_json::Error> {
        let header = SessionHeader {
            event: "session-start",
            schema_version: SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now(),
            config,
            cases,
        };
        serde_json::to_writer(&mut writer, &header)?;
        writer.write_all(b"\n").map_err(serde_json::Error::io)?;
        Ok(Self { writer, progress })
    }

    /// Consume the sink, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn emit(&mut self, event: Event) {
        if !self.progress && matches!(event, Event::Progress { .. }) {
            return;
        }
        let result = serde_json::to_writer(&mut self.writer, &event)
            .and_then(|()| self.writer.write_all(b"\n").map_err(serde_json::Error::io));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write JSON event");
        }
    }
}
