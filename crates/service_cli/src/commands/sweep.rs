//! Sweep command implementation
//!
//! Prices an option across values of one input.

use std::io::Write;

use clap::Args;
use pricer_models::instruments::ParamField;
use pricer_pricing::engine::{ModelKind, PricingModel};
use pricer_pricing::greeks::Greek;
use pricer_pricing::lattice::BinomialTreeEngine;
use pricer_pricing::mc::MonteCarloEngine;
use pricer_risk::comparison::DEFAULT_COMPARISON_SEED;
use pricer_risk::sensitivity::{
    SensitivityAnalyzer, SensitivityGrid, SweepRange, DEFAULT_POINTS, DEFAULT_VARIATION,
};
use serde::Serialize;
use tracing::info;

use super::{InputSummary, OptionArgs};
use crate::config::{CliConfig, OutputFormat};
use crate::output::{fmt_optional, fmt_value, render, Report};
use crate::Result;

/// Arguments of `pricer sweep`.
#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    /// Input to vary (spot, strike, expiry, rate, volatility)
    #[arg(long)]
    pub field: ParamField,

    /// Explicit comma-separated values; overrides --variation/--points
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub values: Option<Vec<f64>>,

    /// Relative variation either side of the base value
    #[arg(long, default_value_t = DEFAULT_VARIATION)]
    pub variation: f64,

    /// Number of generated points
    #[arg(long, default_value_t = DEFAULT_POINTS)]
    pub points: usize,

    /// Pricing model (black-scholes, binomial, monte-carlo)
    #[arg(short, long, default_value = "black-scholes")]
    pub model: ModelKind,

    #[command(flatten)]
    pub option: OptionArgs,

    /// Monte Carlo seed shared by every point (defaults to the configured seed, else 42)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Output of `pricer sweep`.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub inputs: InputSummary,
    pub model: ModelKind,
    pub grid: SensitivityGrid,
}

impl Report for SweepReport {
    fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec![self.grid.field().as_str(), "price"];
        headers.extend(Greek::ALL.iter().map(Greek::as_str));
        headers
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.grid
            .iter()
            .map(|point| {
                let mut row = vec![fmt_value(point.value), fmt_value(point.result.price)];
                row.extend(
                    Greek::ALL
                        .iter()
                        .map(|&greek| fmt_optional(point.result.greeks.and_then(|g| g.get(greek)))),
                );
                row
            })
            .collect()
    }
}

fn engine(args: &SweepArgs, config: &CliConfig) -> Result<PricingModel> {
    Ok(match args.model {
        ModelKind::BlackScholes => PricingModel::black_scholes(),
        ModelKind::BinomialTree => BinomialTreeEngine::new(config.lattice_config()?)?.into(),
        ModelKind::MonteCarlo => {
            let seed = args.seed.or(config.mc_seed).unwrap_or(DEFAULT_COMPARISON_SEED);
            MonteCarloEngine::new(config.monte_carlo_config(Some(seed), false)?)?.into()
        }
    })
}

/// Runs the sweep described by `args`.
pub fn sweep(args: &SweepArgs, config: &CliConfig) -> Result<SweepReport> {
    let params = args.option.params()?;
    let analyzer = SensitivityAnalyzer::new(engine(args, config)?);
    info!(model = %args.model, field = %args.field, "Running sensitivity sweep");

    let grid = match &args.values {
        Some(values) => analyzer.sweep(&params, args.field, values)?,
        None => {
            let range = SweepRange::new(args.variation, args.points)?;
            analyzer.sweep_range(&params, args.field, &range)?
        }
    };

    Ok(SweepReport {
        inputs: InputSummary::from(&params),
        model: args.model,
        grid,
    })
}

/// Run the sweep command
pub fn run<W: Write>(
    args: &SweepArgs,
    config: &CliConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let report = sweep(args, config)?;
    render(out, format, &report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::atm_call;

    fn args(field: ParamField, values: Option<Vec<f64>>) -> SweepArgs {
        SweepArgs {
            field,
            values,
            variation: DEFAULT_VARIATION,
            points: 5,
            model: ModelKind::BlackScholes,
            option: atm_call(),
            seed: None,
        }
    }

    #[test]
    fn test_generated_grid() {
        let report = sweep(&args(ParamField::Spot, None), &CliConfig::default()).unwrap();
        assert_eq!(report.grid.values(), vec![80.0, 90.0, 100.0, 110.0, 120.0]);
        assert_eq!(report.headers()[0], "spot");
        assert_eq!(report.rows()[0][0], "80.000000");
    }

    #[test]
    fn test_explicit_values_and_invalid_point() {
        let ok = sweep(&args(ParamField::Volatility, Some(vec![0.1, 0.3])), &CliConfig::default());
        assert_eq!(ok.unwrap().grid.len(), 2);

        let err = sweep(&args(ParamField::Volatility, Some(vec![0.1, -0.3])), &CliConfig::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_lattice_rows_leave_vega_blank() {
        let mut a = args(ParamField::Strike, Some(vec![100.0]));
        a.model = ModelKind::BinomialTree;
        let report = sweep(&a, &CliConfig::default()).unwrap();
        let vega_column = report.headers().iter().position(|&h| h == "vega").unwrap();
        assert_eq!(report.rows()[0][vega_column], "");
    }

    #[test]
    fn test_unseeded_monte_carlo_sweep_shares_draws() {
        let mut a = args(ParamField::Spot, None);
        a.model = ModelKind::MonteCarlo;
        let config = CliConfig {
            mc_simulations: 2_000,
            ..CliConfig::default()
        };

        let first = sweep(&a, &config).unwrap();
        let second = sweep(&a, &config).unwrap();
        assert_eq!(first.grid.prices(), second.grid.prices());

        // Common draws keep the call curve monotone in spot
        let prices = first.grid.prices();
        assert!(prices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_csv_output() {
        let mut buffer = Vec::new();
        run(&args(ParamField::Rate, None), &CliConfig::default(), OutputFormat::Csv, &mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("rate,price,delta,gamma,vega,theta,rho\n"));
        assert_eq!(text.lines().count(), 6);
    }
}
