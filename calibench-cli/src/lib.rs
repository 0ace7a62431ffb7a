#![warn(missing_docs)]
//! Calibench CLI Library
//!
//! Command-line harness for benchmark binaries. Build a [`CaseRegistry`] and
//! hand it to [`run`]; the returned value is the process exit status.
//!
//! # Example
//!
//! ```ignore
//! use calibench_core::CaseRegistry;
//!
//! fn main() -> anyhow::Result<()> {
//!     let registry = CaseRegistry::new().with("sum", || {
//!         std::hint::black_box((0..1000u64).sum::<u64>());
//!         0
//!     })?;
//!     std::process::exit(calibench_cli::run(registry)?);
//! }
//! ```

mod config;
mod executor;

pub use config::*;
pub use executor::{
    CaseOutcome, Executor, HumanSink, JsonSink, SCHEMA_VERSION, SessionOutcome, format_comparison,
    format_duration, format_summary_line, run_session,
};

use anyhow::Context;
use calibench_core::{BenchConfig, CaseRegistry, ReportSink, run_tests};
use clap::Parser;
use regex::Regex;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Human,
    /// JSON Lines, one object per event
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" | "jsonl" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Calibench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "calibench")]
#[command(version, about = "Calibench - in-process micro-benchmark driver")]
pub struct Cli {
    /// Only run cases whose name matches this regex
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Warmup iterations
    #[arg(long)]
    pub warmup: Option<u64>,

    /// Minimum measured iterations
    #[arg(long)]
    pub min_runs: Option<u64>,

    /// Maximum measured iterations
    #[arg(long)]
    pub max_runs: Option<u64>,

    /// Fixed measured iteration count; overrides calibration
    #[arg(long, short = 'n')]
    pub runs: Option<u64>,

    /// Time budget per case (e.g., "10s", "500ms")
    #[arg(long)]
    pub max_time: Option<String>,

    /// Rank cases against each other
    #[arg(long, overrides_with = "no_compare")]
    pub compare: bool,

    /// Measure cases independently, even if calibench.toml enables comparison
    #[arg(long, overrides_with = "compare")]
    pub no_compare: bool,

    /// Run each case once as a pass/fail test instead of benchmarking it
    #[arg(long)]
    pub test: bool,

    /// Output format: human, json
    #[arg(long)]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// List cases without running them
    #[arg(long)]
    pub list: bool,

    /// Write a default calibench.toml to the current directory and exit
    #[arg(long)]
    pub init: bool,

    /// Configuration file (defaults to a discovered calibench.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// Parse process arguments and run `registry`.
///
/// # Returns
/// The number of failed cases clamped to a valid exit status; `0` means a
/// fully clean run. With `--test` each case is called once instead of
/// benchmarked.
pub fn run(registry: CaseRegistry) -> anyhow::Result<i32> {
    let cli = Cli::parse();
    run_with_cli(cli, registry)
}

/// Run `registry` with pre-parsed arguments.
pub fn run_with_cli(cli: Cli, mut registry: CaseRegistry) -> anyhow::Result<i32> {
    init_logging(cli.verbose);

    if cli.init {
        let path = CalibenchConfig::write_default(".")?;
        println!("Created {}", path.display());
        return Ok(0);
    }

    let file_config = match &cli.config {
        Some(path) => CalibenchConfig::load(path)?,
        None => CalibenchConfig::discover()?.unwrap_or_default(),
    };
    let config = build_bench_config(&cli, &file_config)?;

    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(file_config.output.format.as_str())
        .parse()
        .map_err(anyhow::Error::msg)?;

    let filter = Regex::new(&cli.filter)
        .with_context(|| format!("invalid filter pattern '{}'", cli.filter))?;
    registry.retain(|case| filter.is_match(case.name()));

    if cli.list {
        list_cases(&registry);
        return Ok(0);
    }

    if registry.is_empty() {
        println!("No benchmark cases matched.");
        return Ok(0);
    }

    let mut sink: Box<dyn ReportSink> = match format {
        OutputFormat::Human => Box::new(HumanSink::stdout(config.color)),
        OutputFormat::Json => {
            let names: Vec<String> = registry.names().map(str::to_string).collect();
            let stdout = std::io::stdout().lock();
            let sink = JsonSink::start(stdout, &config.resolved(), &names, false)
                .context("failed to write session header")?;
            Box::new(sink)
        }
    };

    if cli.test {
        let failed = run_tests(&registry, &mut *sink);
        return Ok(failed.min(255) as i32);
    }

    let outcome = run_session(&registry, &config, &mut *sink);
    Ok(outcome.exit_code())
}

/// Run `registry` with an explicit configuration, rendering to stdout.
///
/// Returns the number of failed cases. No arguments are parsed and no
/// configuration file is read.
pub fn run_with_config(registry: &CaseRegistry, config: &BenchConfig) -> u64 {
    let mut sink = HumanSink::stdout(config.color);
    run_with_sink(registry, config, &mut sink).failure_count()
}

/// Run `registry` against a caller-provided sink
pub fn run_with_sink(
    registry: &CaseRegistry,
    config: &BenchConfig,
    sink: &mut dyn ReportSink,
) -> SessionOutcome {
    run_session(registry, config, sink)
}

/// Build a BenchConfig by layering: built-in defaults → calibench.toml → CLI flags.
pub fn build_bench_config(cli: &Cli, file: &CalibenchConfig) -> anyhow::Result<BenchConfig> {
    let mut config = file.to_bench_config()?;

    if let Some(n) = cli.warmup {
        config.n_warmup = n;
    }
    if let Some(n) = cli.min_runs {
        config.min_runs = n;
    }
    if let Some(n) = cli.max_runs {
        config.max_runs = n;
    }
    if let Some(n) = cli.runs {
        config.n_runs_fixed = n;
    }
    if let Some(time) = &cli.max_time {
        config.max_bench_time = parse_duration(time)?;
    }
    if cli.compare {
        config.compare = true;
    }
    if cli.no_compare {
        config.compare = false;
    }
    if cli.no_color {
        config.color = false;
    }

    Ok(config)
}

/// Install the tracing subscriber. `RUST_LOG` wins when set.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "calibench=debug,calibench_core=debug,calibench_cli=debug"
    } else {
        "calibench=info,calibench_core=info,calibench_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when `run` is called twice.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn list_cases(registry: &CaseRegistry) {
    println!("Calibench cases:");
    for name in registry.names() {
        println!("├── {}", name);
    }
    println!("{} cases found.", registry.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("human".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "calibench",
            "factorial",
            "--runs",
            "6",
            "--max-time",
            "2s",
            "--compare",
            "--no-color",
        ]);

        assert_eq!(cli.filter, "factorial");
        assert_eq!(cli.runs, Some(6));
        assert!(cli.compare);
        assert!(cli.no_color);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file: CalibenchConfig = toml::from_str(
            r#"
            [runner]
            n_warmup = 3
            min_runs = 20
            max_bench_time = "5s"
            "#,
        )
        .unwrap();
        let cli = Cli::parse_from(["calibench", "--min-runs", "7", "--max-time", "250ms"]);

        let config = build_bench_config(&cli, &file).unwrap();

        assert_eq!(config.n_warmup, 3);
        assert_eq!(config.min_runs, 7);
        assert!((config.max_bench_time - 0.25).abs() < 1e-12);
        assert!(config.color);
    }

    #[test]
    fn test_no_compare_overrides_file() {
        let file: CalibenchConfig = toml::from_str("[runner]\ncompare = true").unwrap();

        let cli = Cli::parse_from(["calibench"]);
        assert!(build_bench_config(&cli, &file).unwrap().compare);

        let cli = Cli::parse_from(["calibench", "--no-compare"]);
        assert!(!build_bench_config(&cli, &file).unwrap().compare);

        // The last of the pair wins
        let cli = Cli::parse_from(["calibench", "--no-compare", "--compare"]);
        assert!(cli.compare && !cli.no_compare);
        assert!(build_bench_config(&cli, &file).unwrap().compare);
    }

    #[test]
    fn test_cli_rejects_bad_duration() {
        let cli = Cli::parse_from(["calibench", "--max-time", "soon"]);
        assert!(build_bench_config(&cli, &CalibenchConfig::default()).is_err());
    }

    #[test]
    fn test_run_with_sink_counts_failures() {
        let registry = CaseRegistry::new()
            .with("ok", || 0)
            .unwrap()
            .with("bad", || 1)
            .unwrap();
        let config = BenchConfig::default().with_warmup(1).with_fixed_runs(2);
        let mut sink = calibench_core::NullSink;

        let outcome = run_with_sink(&registry, &config, &mut sink);
        assert_eq!(outcome.failure_count(), 1);
    }
}
