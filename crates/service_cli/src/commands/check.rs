//! Check command implementation
//!
//! Shows the effective configuration after file, environment and flag
//! overrides have been merged and validated.

use std::io::Write;

use serde::Serialize;

use crate::config::{CliConfig, OutputFormat};
use crate::output::{render, Report};
use crate::Result;

/// Output of `pricer check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub version: &'static str,
    pub source: Option<String>,
    pub config: CliConfig,
}

impl CheckReport {
    pub fn new(config: &CliConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            source: config.source.as_ref().map(|p| p.display().to_string()),
            config: config.clone(),
        }
    }
}

impl Report for CheckReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["setting", "value"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let c = &self.config;
        let row = |key: &str, value: String| vec![key.to_string(), value];
        vec![
            row("version", self.version.to_string()),
            row("source", self.source.clone().unwrap_or_else(|| "defaults".to_string())),
            row("log_level", c.log_level.to_string()),
            row("output_format", c.output_format.to_string()),
            row("binomial_steps", c.binomial_steps.to_string()),
            row("max_binomial_steps", c.max_binomial_steps.to_string()),
            row("mc_simulations", c.mc_simulations.to_string()),
            row("max_mc_simulations", c.max_mc_simulations.to_string()),
            row(
                "mc_seed",
                c.mc_seed.map(|s| s.to_string()).unwrap_or_else(|| "entropy".to_string()),
            ),
            row("iv_tolerance", format!("{:e}", c.iv_tolerance)),
            row("iv_max_iterations", c.iv_max_iterations.to_string()),
        ]
    }
}

/// Run the check command
pub fn run<W: Write>(config: &CliConfig, format: OutputFormat, out: &mut W) -> Result<()> {
    render(out, format, &CheckReport::new(config))
}
