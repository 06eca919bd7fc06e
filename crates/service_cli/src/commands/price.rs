//! Price command implementation
//!
//! Prices one option with a chosen engine.

use std::io::Write;

use clap::Args;
use pricer_pricing::analytical::BlackScholesEngine;
use pricer_pricing::engine::{ModelKind, PricingEngine};
use pricer_pricing::greeks::{Greek, PricingResult};
use pricer_pricing::lattice::BinomialTreeEngine;
use pricer_pricing::mc::MonteCarloEngine;
use serde::Serialize;
use tracing::info;

use super::{InputSummary, OptionArgs};
use crate::config::{CliConfig, OutputFormat};
use crate::output::{fmt_optional, fmt_value, render, Report};
use crate::Result;

/// Arguments of `pricer price`.
#[derive(Args, Debug, Clone)]
pub struct PriceArgs {
    /// Pricing model (black-scholes, binomial, monte-carlo)
    #[arg(short, long, default_value = "black-scholes")]
    pub model: ModelKind,

    #[command(flatten)]
    pub option: OptionArgs,

    /// Lattice steps (binomial only)
    #[arg(long)]
    pub steps: Option<usize>,

    /// Simulated paths (Monte Carlo only)
    #[arg(long)]
    pub simulations: Option<usize>,

    /// Random seed (Monte Carlo only)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Estimate Monte Carlo Greeks by bump-and-revalue
    #[arg(long)]
    pub greeks: bool,
}

/// Output of `pricer price`.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub inputs: InputSummary,
    #[serde(flatten)]
    pub result: PricingResult,
}

impl Report for PriceReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["metric", "value"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let mut rows = vec![
            vec!["model".to_string(), self.result.model.to_string()],
            vec!["price".to_string(), fmt_value(self.result.price)],
        ];
        if let Some(se) = self.result.std_error {
            rows.push(vec!["std_error".to_string(), fmt_value(se)]);
        }
        if let Some(ci) = self.result.confidence_interval {
            rows.push(vec!["ci95_lower".to_string(), fmt_value(ci.lower)]);
            rows.push(vec!["ci95_upper".to_string(), fmt_value(ci.upper)]);
        }
        if let Some(greeks) = self.result.greeks {
            for greek in Greek::ALL {
                if let Some(value) = greeks.get(greek) {
                    rows.push(vec![greek.to_string(), fmt_optional(Some(value))]);
                }
            }
        }
        rows
    }
}

/// Prices the option described by `args`.
pub fn price(args: &PriceArgs, config: &CliConfig) -> Result<PriceReport> {
    let params = args.option.params()?;
    info!(model = %args.model, exercise = %params.exercise(), "Pricing option");

    let result = match args.model {
        ModelKind::BlackScholes => BlackScholesEngine::new().price(&params)?,
        ModelKind::BinomialTree => {
            let engine = BinomialTreeEngine::new(config.lattice_config()?)?;
            let steps = args.steps.unwrap_or(engine.config().steps());
            engine.price_with_steps(&params, steps)?
        }
        ModelKind::MonteCarlo => {
            let engine = MonteCarloEngine::new(config.monte_carlo_config(args.seed, args.greeks)?)?;
            let simulations = args.simulations.unwrap_or(engine.config().simulations());
            engine.price_with_simulations(&params, simulations, engine.config().seed())?
        }
    };

    Ok(PriceReport {
        inputs: InputSummary::from(&params),
        result,
    })
}

/// Run the price command
pub fn run<W: Write>(
    args: &PriceArgs,
    config: &CliConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let report = price(args, config)?;
    render(out, format, &report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::atm_call;
    use approx::assert_relative_eq;
    use pricer_models::instruments::ExerciseStyle;

    fn args(model: ModelKind) -> PriceArgs {
        PriceArgs {
            model,
            option: atm_call(),
            steps: None,
            simulations: None,
            seed: Some(42),
            greeks: false,
        }
    }

    #[test]
    fn test_black_scholes_reference() {
        let report = price(&args(ModelKind::BlackScholes), &CliConfig::default()).unwrap();
        assert_relative_eq!(report.result.price, 10.4506, epsilon = 1e-4);
        let greeks = report.result.greeks.unwrap();
        assert_relative_eq!(greeks.theta.unwrap(), -0.0176, epsilon = 1e-4);
    }

    #[test]
    fn test_binomial_steps_override_checked() {
        let mut a = args(ModelKind::BinomialTree);
        a.steps = Some(1000);
        let report = price(&a, &CliConfig::default()).unwrap();
        assert!((report.result.price - 10.4506).abs() < 0.01);

        a.steps = Some(20_000);
        assert!(price(&a, &CliConfig::default()).unwrap_err().exit_code() == 2);
    }

    #[test]
    fn test_monte_carlo_rows_include_interval() {
        let mut a = args(ModelKind::MonteCarlo);
        a.greeks = true;
        let report = price(&a, &CliConfig::default()).unwrap();
        let names: Vec<String> = report.rows().into_iter().map(|row| row[0].clone()).collect();

        assert!(names.contains(&"std_error".to_string()));
        assert!(names.contains(&"ci95_upper".to_string()));
        assert!(names.contains(&"delta".to_string()));
    }

    #[test]
    fn test_american_rejected_by_closed_form() {
        let mut a = args(ModelKind::BlackScholes);
        a.option.quote.exercise = ExerciseStyle::American;
        assert!(price(&a, &CliConfig::default()).is_err());
    }

    #[test]
    fn test_json_output() {
        let mut buffer = Vec::new();
        run(&args(ModelKind::BinomialTree), &CliConfig::default(), OutputFormat::Json, &mut buffer)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["model"], "binomial_tree");
        assert_eq!(value["inputs"]["option_type"], "call");
    }
}
