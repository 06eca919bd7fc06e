//! Implied volatility command implementation

use std::io::Write;

use clap::Args;
use pricer_models::analytical::{BlackScholes, ImpliedVolatilitySolver};
use serde::Serialize;
use tracing::info;

use super::{InputSummary, QuoteArgs};
use crate::config::{CliConfig, OutputFormat};
use crate::output::{fmt_value, render, Report};
use crate::Result;

/// Arguments of `pricer implied-vol`.
#[derive(Args, Debug, Clone)]
pub struct ImpliedVolArgs {
    /// Observed option price
    #[arg(long = "market-price")]
    pub market_price: f64,

    #[command(flatten)]
    pub quote: QuoteArgs,

    /// Starting volatility for Newton iteration
    #[arg(long = "initial-guess")]
    pub initial_guess: Option<f64>,
}

/// Output of `pricer implied-vol`.
#[derive(Debug, Clone, Serialize)]
pub struct ImpliedVolReport {
    pub inputs: InputSummary,
    pub market_price: f64,
    pub implied_volatility: f64,
    /// Black-Scholes price at the solved volatility
    pub model_price: f64,
}

impl Report for ImpliedVolReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["metric", "value"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![
            vec!["market_price".to_string(), fmt_value(self.market_price)],
            vec!["implied_volatility".to_string(), fmt_value(self.implied_volatility)],
            vec!["model_price".to_string(), fmt_value(self.model_price)],
            vec![
                "residual".to_string(),
                format!("{:.3e}", self.model_price - self.market_price),
            ],
        ]
    }
}

/// Solves for the volatility implied by `args.market_price`.
pub fn solve(args: &ImpliedVolArgs, config: &CliConfig) -> Result<ImpliedVolReport> {
    let quote = args.quote.quote()?;
    info!(market_price = args.market_price, "Solving implied volatility");

    let solver = ImpliedVolatilitySolver::new(config.implied_vol_config()?);
    let implied_volatility = solver.solve(args.market_price, &quote, args.initial_guess)?;
    let model_price = BlackScholes::from_params(&quote.with_volatility(implied_volatility)?)?
        .price(quote.option_type());

    Ok(ImpliedVolReport {
        inputs: InputSummary::from(&quote),
        market_price: args.market_price,
        implied_volatility,
        model_price,
    })
}

/// Run the implied-vol command
pub fn run<W: Write>(
    args: &ImpliedVolArgs,
    config: &CliConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let report = solve(args, config)?;
    render(out, format, &report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::atm_call;
    use approx::assert_relative_eq;

    fn args(market_price: f64) -> ImpliedVolArgs {
        ImpliedVolArgs {
            market_price,
            quote: atm_call().quote,
            initial_guess: None,
        }
    }

    #[test]
    fn test_recovers_reference_volatility() {
        let report = solve(&args(10.450584), &CliConfig::default()).unwrap();
        assert_relative_eq!(report.implied_volatility, 0.2, epsilon = 1e-4);
        assert!((report.model_price - report.market_price).abs() < 1e-5);
    }

    #[test]
    fn test_price_above_spot_rejected() {
        let err = solve(&args(150.0), &CliConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
