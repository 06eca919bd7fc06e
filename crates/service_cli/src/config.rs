//! CLI configuration management
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML
//! file, `PRICER_*` environment variables and command-line flags.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_models::analytical::ImpliedVolConfig;
use pricer_pricing::lattice::{LatticeConfig, DEFAULT_TREE_STEPS, MAX_TREE_STEPS};
use pricer_pricing::mc::{MonteCarloConfig, DEFAULT_SIMULATIONS, MAX_PATHS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file read when `--config` is not given. Its absence is not an error.
pub const DEFAULT_CONFIG_FILE: &str = "pricer.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidOutputFormat(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable {var}: {message}")]
    EnvError { var: &'static str, message: String },
}

/// Log levels accepted by `log_level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Rendering of command results on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned plain-text columns
    #[default]
    Table,
    /// Pretty-printed JSON document
    Json,
    /// CSV with a header row
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Effective CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Default lattice depth
    pub binomial_steps: usize,
    /// Largest accepted lattice depth
    pub max_binomial_steps: usize,
    /// Default Monte Carlo path count
    pub mc_simulations: usize,
    /// Largest accepted Monte Carlo path count
    pub max_mc_simulations: usize,
    /// Monte Carlo seed; unseeded runs draw fresh entropy
    pub mc_seed: Option<u64>,
    /// Implied volatility price tolerance
    pub iv_tolerance: f64,
    /// Implied volatility iteration budget
    pub iv_max_iterations: usize,
    /// Default output format
    #[serde(deserialize_with = "deserialize_from_str")]
    pub output_format: OutputFormat,
    /// File the settings were read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        let iv = ImpliedVolConfig::default();
        Self {
            log_level: LogLevel::Info,
            binomial_steps: DEFAULT_TREE_STEPS,
            max_binomial_steps: MAX_TREE_STEPS,
            mc_simulations: DEFAULT_SIMULATIONS,
            max_mc_simulations: MAX_PATHS,
            mc_seed: None,
            iv_tolerance: iv.solver.tolerance,
            iv_max_iterations: iv.solver.max_iterations,
            output_format: OutputFormat::Table,
            source: None,
        }
    }
}

fn parse_env<T: FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::EnvError {
        var,
        message: format!("'{}': {}", raw, e),
    })
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let mut config: CliConfig = toml::from_str(&content).map_err(|e| {
            ConfigError::FileError(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Applies `PRICER_*` variables found through `lookup`.
    ///
    /// `lookup` is `std::env::var(..).ok()` in production.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("PRICER_LOG_LEVEL") {
            self.log_level = parse_env("PRICER_LOG_LEVEL", &raw)?;
        }
        if let Some(raw) = lookup("PRICER_BINOMIAL_STEPS") {
            self.binomial_steps = parse_env("PRICER_BINOMIAL_STEPS", &raw)?;
        }
        if let Some(raw) = lookup("PRICER_MAX_BINOMIAL_STEPS") {
            self.max_binomial_steps = parse_env("PRICER_MAX_BINOMIAL_STEPS", &raw)?;
        }
        if let Some(raw) = lookup("PRICER_MC_SIMULATIONS") {
            self.mc_simulations = parse_env("PRICER_MC_SIMULATIONS", &raw)?;
        }
        if let Some(raw) = lookup("PRICER_MAX_MC_SIMULATIONS") {
            self.max_mc_simulations = parse_env("PRICER_MAX_MC_SIMULATIONS", &raw)?;
        }
        if let Some(raw) = lookup("PRICER_MC_SEED") {
            self.mc_seed = Some(parse_env("PRICER_MC_SEED", &raw)?);
        }
        if let Some(raw) = lookup("PRICER_IV_TOLERANCE") {
            self.iv_tolerance = parse_env("PRICER_IV_TOLERANCE", &raw)?;
        }
        if let Some(raw) = lookup("PRICER_IV_MAX_ITERATIONS") {
            self.iv_max_iterations = parse_env("PRICER_IV_MAX_ITERATIONS", &raw)?;
        }
        if let Some(raw) = lookup("PRICER_OUTPUT_FORMAT") {
            self.output_format = parse_env("PRICER_OUTPUT_FORMAT", &raw)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(format) = cli.output_format {
            self.output_format = format;
        }
    }

    /// Validate the configuration
    ///
    /// Defaults must not exceed their maxima, and maxima must not exceed
    /// the engine hard caps.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lattice_config()?;
        self.monte_carlo_config(None, false)?;
        self.implied_vol_config()?;
        Ok(())
    }

    /// Lattice settings.
    pub fn lattice_config(&self) -> Result<LatticeConfig, ConfigError> {
        LatticeConfig::new(self.binomial_steps, self.max_binomial_steps).map_err(|e| {
            ConfigError::InvalidValue {
                key: "binomial_steps",
                message: e.to_string(),
            }
        })
    }

    /// Monte Carlo settings with an optional seed override.
    ///
    /// Without an override the configured `mc_seed` applies.
    pub fn monte_carlo_config(
        &self,
        seed: Option<u64>,
        greeks: bool,
    ) -> Result<MonteCarloConfig, ConfigError> {
        MonteCarloConfig::builder()
            .simulations(self.mc_simulations)
            .max_simulations(self.max_mc_simulations)
            .maybe_seed(seed.or(self.mc_seed))
            .greeks(greeks)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "mc_simulations",
                message: e.to_string(),
            })
    }

    /// Implied volatility solver settings.
    pub fn implied_vol_config(&self) -> Result<ImpliedVolConfig, ConfigError> {
        let defaults = ImpliedVolConfig::default();
        ImpliedVolConfig::new(
            self.iv_tolerance,
            self.iv_max_iterations,
            defaults.lower_bound,
            defaults.upper_bound,
        )
        .map_err(|e| ConfigError::InvalidValue {
            key: "iv_tolerance",
            message: e.to_string(),
        })
    }
}

/// Global CLI flags that affect configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Explicit config file; must exist when given
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Forces debug logging
    pub verbose: bool,
    /// Output format override
    pub output_format: Option<OutputFormat>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config<F>(cli: &CliArgs, env: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                CliConfig::from_file(default_path)?
            } else {
                CliConfig::default()
            }
        }
    };

    config.apply_env(env)?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}
