//! Compare command implementation
//!
//! Prices one option with every model side by side.

use std::io::Write;

use clap::Args;
use pricer_risk::comparison::{
    ComparatorConfig, ComparisonResult, ModelComparator, ModelOutcome, DEFAULT_COMPARISON_SEED,
};
use serde::Serialize;
use tracing::info;

use super::{InputSummary, OptionArgs};
use crate::config::{CliConfig, OutputFormat};
use crate::output::{fmt_optional, fmt_value, render, Report};
use crate::Result;

/// Arguments of `pricer compare`.
#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub option: OptionArgs,

    /// Monte Carlo seed (defaults to the configured seed, else 42)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Output of `pricer compare`.
#[derive(Debug, Clone, Serialize)]
pub struct CompareReport {
    pub inputs: InputSummary,
    pub comparison: ComparisonResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_spread: Option<f64>,
}

impl Report for CompareReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["model", "status", "price", "std_error", "delta", "detail"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.comparison
            .outcomes()
            .map(|(kind, outcome)| match outcome {
                ModelOutcome::Priced(result) => vec![
                    kind.to_string(),
                    "priced".to_string(),
                    fmt_value(result.price),
                    fmt_optional(result.std_error),
                    fmt_optional(result.greeks.and_then(|g| g.delta)),
                    String::new(),
                ],
                ModelOutcome::Rejected(err) => vec![
                    kind.to_string(),
                    "rejected".to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                    err.to_string(),
                ],
            })
            .collect()
    }

    fn notes(&self) -> Vec<String> {
        self.price_spread
            .map(|spread| vec![format!("price spread: {}", fmt_value(spread))])
            .unwrap_or_default()
    }
}

/// Compares every model on the option described by `args`.
pub fn compare(args: &CompareArgs, config: &CliConfig) -> Result<CompareReport> {
    let params = args.option.params()?;
    let seed = args.seed.or(config.mc_seed).unwrap_or(DEFAULT_COMPARISON_SEED);
    info!(seed, "Comparing models");

    let comparator = ModelComparator::new(ComparatorConfig {
        lattice: config.lattice_config()?,
        monte_carlo: config.monte_carlo_config(Some(seed), false)?,
    })?;
    let comparison = comparator.compare(&params)?;

    Ok(CompareReport {
        inputs: InputSummary::from(&params),
        price_spread: comparison.price_spread(),
        comparison,
    })
}

/// Run the compare command
pub fn run<W: Write>(
    args: &CompareArgs,
    config: &CliConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let report = compare(args, config)?;
    render(out, format, &report)
}
