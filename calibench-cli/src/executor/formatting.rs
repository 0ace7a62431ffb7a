//! Output Formatting
//!
//! Human-readable terminal rendering of engine events:
//! - A progress bar per phase while iterations run
//! - One result line per measured phase (mean ± stddev, min/max, failures)
//! - A comparison table sorted fastest first
//! - Pass/fail lines and a tally for test runs
//!
//! Color is an explicit constructor argument; nothing here reads global state.

use calibench_core::{Event, PhaseKind, ReportSink};
use calibench_stats::{BenchSummary, Ranking};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Style};
use std::io::Write;

/// Format a duration given in seconds with an auto-scaled unit
pub fn format_duration(secs: f64) -> String {
    if !secs.is_finite() {
        return format!("{}", secs);
    }
    let abs = secs.abs();
    if abs < 1e-6 {
        format!("{:.2} ns", secs * 1e9)
    } else if abs < 1e-3 {
        format!("{:.2} µs", secs * 1e6)
    } else if abs < 1.0 {
        format!("{:.2} ms", secs * 1e3)
    } else {
        format!("{:.2} s", secs)
    }
}

/// Render the one-line result of a measured phase
pub fn format_summary_line(name: &str, summary: &BenchSummary) -> String {
    let mut line = format!(
        "{}: mean {} ± {}  [min {}, max {}]  runs: {}",
        name,
        format_duration(summary.mean),
        format_duration(summary.std_dev()),
        format_duration(summary.min),
        format_duration(summary.max),
        summary.sample_count,
    );
    if summary.has_failed {
        line.push_str(&format!("  failed: {}", summary.failed_count));
    }
    line
}

/// Render the comparison table for a ranked batch
pub fn format_comparison(names: &[String], summaries: &[BenchSummary], ranking: &Ranking) -> String {
    let mut output = String::new();
    output.push_str("Comparison\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');

    let width = names.iter().map(|n| n.len()).max().unwrap_or(20).max(4);
    output.push_str(&format!(
        "  {:<width$}  {:>12}  {:>10}\n",
        "Case",
        "Mean",
        "Slow-down",
        width = width
    ));
    output.push_str(&format!("  {}\n", "-".repeat(width + 26)));

    let mut rows: Vec<(usize, f64)> = vec![(ranking.fastest, 1.0)];
    rows.extend(ranking.slow_downs.iter().map(|s| (s.index, s.factor)));
    rows.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    for (index, factor) in rows {
        let name = names.get(index).map(String::as_str).unwrap_or("?");
        let mean = summaries.get(index).map(|s| s.mean).unwrap_or(0.0);
        let factor = if index == ranking.fastest {
            "fastest".to_string()
        } else {
            format!("{:.2}x", factor)
        };
        output.push_str(&format!(
            "  {:<width$}  {:>12}  {:>10}\n",
            name,
            format_duration(mean),
            factor,
            width = width
        ));
    }

    output
}

/// Terminal sink with progress bars and optional color
pub struct HumanSink<W: Write> {
    writer: W,
    color: bool,
    show_progress: bool,
    progress: Option<ProgressBar>,
}

impl HumanSink<std::io::Stdout> {
    /// Sink writing to stdout; color is only used when stdout is a terminal.
    pub fn stdout(color: bool) -> Self {
        use std::io::IsTerminal;
        let tty = std::io::stdout().is_terminal();
        Self::new(std::io::stdout(), color && tty, tty)
    }
}

impl<W: Write> HumanSink<W> {
    /// Create a sink over `writer`
    pub fn new(writer: W, color: bool, show_progress: bool) -> Self {
        Self {
            writer,
            color,
            show_progress,
            progress: None,
        }
    }

    /// Consume the sink, returning the writer
    pub fn into_inner(mut self) -> W {
        self.clear_progress();
        self.writer
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{}", line) {
            tracing::warn!(error = %e, "failed to write report line");
        }
    }

    fn clear_progress(&mut self) {
        if let Some(pb) = self.progress.take() {
            pb.finish_and_clear();
        }
    }

    fn start_progress(&mut self, case: &str, kind: PhaseKind, total: u64) {
        self.clear_progress();
        if !self.show_progress {
            return;
        }
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(format!("{} ({})", case, kind));
        self.progress = Some(pb);
    }
}

impl<W: Write> ReportSink for HumanSink<W> {
    fn emit(&mut self, event: Event) {
        match event {
            Event::PhaseStart { case, kind, total } => {
                if kind == PhaseKind::Warmup {
                    let header = self.paint(&case, Style::new().bold());
                    self.write_line(&format!("▶ {}", header));
                }
                self.start_progress(&case, kind, total);
            }
            Event::Progress { done, .. } => {
                if let Some(pb) = &self.progress {
                    pb.set_position(done);
                }
            }
            Event::PhaseSummary {
                case,
                kind,
                summary,
            } => {
                self.clear_progress();
                match kind {
                    PhaseKind::Warmup => {
                        let line = format!(
                            "  warmup: mean {} over {} runs",
                            format_duration(summary.mean),
                            summary.sample_count
                        );
                        let line = self.paint(&line, Style::new().dimmed());
                        self.write_line(&line);
                    }
                    PhaseKind::Measured => {
                        let (icon, style) = if summary.has_failed {
                            ("✗", Style::new().red())
                        } else {
                            ("✓", Style::new().green())
                        };
                        let icon = self.paint(icon, style);
                        let line = format_summary_line(&case, &summary);
                        self.write_line(&format!("  {} {}", icon, line));
                    }
                }
            }
            Event::BatchSummary {
                cases,
                summaries,
                ranking,
            } => {
                self.clear_progress();
                let fastest = cases.get(ranking.fastest).cloned().unwrap_or_default();
                let fastest = self.paint(&fastest, Style::new().green().bold());
                self.write_line("");
                self.write_line(&format!(
                    "Fastest: {} ({})",
                    fastest,
                    format_duration(ranking.fastest_mean)
                ));
                let table = format_comparison(&cases, &summaries, &ranking);
                self.write_line(table.trim_end());
            }
            Event::TestResult { case, failures } => {
                let line = if failures == 0 {
                    format!("  {} {}", self.paint("✓", Style::new().green()), case)
                } else {
                    format!(
                        "  {} {} ({} failed checks)",
                        self.paint("✗", Style::new().red()),
                        case,
                        failures
                    )
                };
                self.write_line(&line);
            }
            Event::TestSummary { passed, failed } => {
                let style = if failed == 0 {
                    Style::new().green().bold()
                } else {
                    Style::new().red().bold()
                };
                let line = format!("{} passed, {} failed", passed, failed);
                let line = self.paint(&line, style);
                self.write_line("");
                self.write_line(&line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calibench_stats::rank_summaries;

    fn summary(mean: f64, failed: u64) -> BenchSummary {
        BenchSummary {
            has_failed: failed > 0,
            mean,
            min: mean,
            max: mean,
            variance: 0.0,
            failed_count: failed,
            sample_count: 10,
        }
    }

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(5e-9), "5.00 ns");
        assert_eq!(format_duration(2.5e-6), "2.50 µs");
        assert_eq!(format_duration(0.0125), "12.50 ms");
        assert_eq!(format_duration(3.0), "3.00 s");
    }

    #[test]
    fn test_summary_line_reports_failures() {
        let line = format_summary_line("parse", &summary(0.002, 3));
        assert!(line.starts_with("parse: mean 2.00 ms"));
        assert!(line.contains("failed: 3"));

        let clean = format_summary_line("parse", &summary(0.002, 0));
        assert!(!clean.contains("failed"));
    }

    #[test]
    fn test_comparison_sorted_fastest_first() {
        let names = vec!["slow".to_string(), "fast".to_string(), "mid".to_string()];
        let summaries = vec![summary(5.0, 0), summary(1.0, 0), summary(3.0, 0)];
        let ranking = rank_summaries(&summaries).unwrap();

        let table = format_comparison(&names, &summaries, &ranking);
        let fast = table.find("fast ").unwrap();
        let mid = table.find("mid").unwrap();
        let slow = table.find("slow").unwrap();

        assert!(fast < mid && mid < slow);
        assert!(table.contains("fastest"));
        assert!(table.contains("5.00x"));
        assert!(table.contains("3.00x"));
    }

    #[test]
    fn test_human_sink_plain_output() {
        let mut sink = HumanSink::new(Vec::new(), false, false);
        sink.emit(Event::PhaseStart {
            case: "sum".into(),
            kind: PhaseKind::Warmup,
            total: 2,
        });
        sink.emit(Event::PhaseSummary {
            case: "sum".into(),
            kind: PhaseKind::Measured,
            summary: summary(1e-3, 0),
        });

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("▶ sum"));
        assert!(out.contains("✓ sum: mean 1.00 ms"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_human_sink_test_run() {
        let mut sink = HumanSink::new(Vec::new(), false, false);
        sink.emit(Event::TestResult {
            case: "foo".into(),
            failures: 0,
        });
        sink.emit(Event::TestResult {
            case: "bar".into(),
            failures: 2,
        });
        sink.emit(Event::TestSummary {
            passed: 1,
            failed: 1,
        });

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("✓ foo\n"));
        assert!(out.contains("✗ bar (2 failed checks)"));
        assert!(out.ends_with("1 passed, 1 failed\n"));
    }

    #[test]
    fn test_human_sink_colored_output() {
        let mut sink = HumanSink::new(Vec::new(), true, false);
        sink.emit(Event::PhaseSummary {
            case: "bad".into(),
            kind: PhaseKind::Measured,
            summary: summary(1e-3, 1),
        });

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("failed: 1"));
    }
}
