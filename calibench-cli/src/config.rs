//! Configuration loading from calibench.toml
//!
//! Calibench configuration can be specified in a `calibench.toml` file in the
//! project root. The file is discovered by walking up from the current
//! directory. Missing or zero values fall through to the engine defaults.

use calibench_core::BenchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for by [`CalibenchConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "calibench.toml";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path that failed
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// The file could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// `init` refuses to overwrite an existing file
    #[error("{0} already exists")]
    AlreadyExists(PathBuf),

    /// A duration string could not be parsed
    #[error("invalid duration '{0}'")]
    InvalidDuration(String),

    /// A duration string used an unknown unit
    #[error("unknown duration unit '{0}'")]
    UnknownUnit(String),
}

/// Calibench configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalibenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunnerConfig {
    /// Warmup iterations
    #[serde(default)]
    pub n_warmup: Option<u64>,
    /// Minimum measured iterations
    #[serde(default)]
    pub min_runs: Option<u64>,
    /// Maximum measured iterations
    #[serde(default)]
    pub max_runs: Option<u64>,
    /// Fixed measured iteration count
    #[serde(default)]
    pub n_runs_fixed: Option<u64>,
    /// Time budget per case (e.g., "10s", "500ms")
    #[serde(default)]
    pub max_bench_time: Option<String>,
    /// Rank cases against each other
    #[serde(default)]
    pub compare: bool,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Colored terminal output
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: default_color(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_color() -> bool {
    true
}

impl CalibenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Walk up from the current directory looking for `calibench.toml`.
    ///
    /// Returns `Ok(None)` when no file exists; a file that exists but fails to
    /// load is an error.
    pub fn discover() -> Result<Option<Self>, ConfigError> {
        let Ok(mut dir) = std::env::current_dir() else {
            return Ok(None);
        };
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                tracing::debug!(path = %config_path.display(), "loading configuration");
                return Self::load(&config_path).map(Some);
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Convert the file values into an engine configuration.
    ///
    /// Unset values stay zero so the engine applies its defaults.
    pub fn to_bench_config(&self) -> Result<BenchConfig, ConfigError> {
        let max_bench_time = match &self.runner.max_bench_time {
            Some(s) => parse_duration(s)?,
            None => 0.0,
        };

        Ok(BenchConfig {
            n_warmup: self.runner.n_warmup.unwrap_or(0),
            min_runs: self.runner.min_runs.unwrap_or(0),
            max_runs: self.runner.max_runs.unwrap_or(0),
            n_runs_fixed: self.runner.n_runs_fixed.unwrap_or(0),
            max_bench_time,
            compare: self.runner.compare,
            color: self.output.color,
        })
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Calibench Configuration

[runner]
# Warmup iterations used to estimate per-call cost
n_warmup = 10
# Bounds for the calibrated number of measured iterations
min_runs = 10
max_runs = 100
# Fixed measured iteration count, skipping calibration (uncomment to enable)
# n_runs_fixed = 6
# Time budget per case; informs calibration, not enforced
max_bench_time = "10s"
# Rank cases against each other when more than one is registered
compare = false

[output]
# Output format: human or json
format = "human"
# Colored terminal output
color = true
"#
        .to_string()
    }

    /// Write [`default_toml`](Self::default_toml) to `dir/calibench.toml`.
    ///
    /// An existing file is left untouched and reported as an error.
    pub fn write_default(dir: impl AsRef<Path>) -> Result<PathBuf, ConfigError> {
        use std::io::Write;

        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::AlreadyExists => ConfigError::AlreadyExists(path.clone()),
                _ => write_err(source),
            })?;
        file.write_all(Self::default_toml().as_bytes())
            .map_err(write_err)?;
        Ok(path)
    }
}

/// Parse a duration string (e.g., "3s", "500ms", "2m") to seconds.
///
/// A bare number is taken as seconds.
pub fn parse_duration(s: &str) -> Result<f64, ConfigError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ConfigError::InvalidDuration(s.to_string()));
    }

    // The unit is the trailing run of letters, so exponents stay numeric.
    let split = s.trim_end_matches(char::is_alphabetic).len();
    let (num_part, unit_part) = match s.split_at(split) {
        (num, "") => (num, "s"),
        parts => parts,
    };

    let value: f64 = num_part
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidDuration(s.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidDuration(s.to_string()));
    }

    let multiplier = match unit_part.to_lowercase().as_str() {
        "ns" => 1e-9,
        "us" | "µs" => 1e-6,
        "ms" => 1e-3,
        "s" | "sec" => 1.0,
        "m" | "min" => 60.0,
        _ => return Err(ConfigError::UnknownUnit(unit_part.to_string())),
    };

    Ok(value * multiplier)
}
