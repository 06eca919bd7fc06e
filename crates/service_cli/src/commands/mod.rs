//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Option inputs shared
//! between commands are parsed here.

pub mod check;
pub mod compare;
pub mod implied_vol;
pub mod payoff;
pub mod price;
pub mod sweep;

use clap::Args;
use pricer_models::instruments::{ExerciseStyle, OptionParams, OptionType, QuoteParams};
use serde::Serialize;

use crate::Result;

/// Option inputs other than volatility.
#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(long)]
    pub expiry: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    pub rate: f64,

    /// Option type (call, put)
    #[arg(long = "option-type", default_value = "call")]
    pub option_type: OptionType,

    /// Exercise style (european, american)
    #[arg(long, default_value = "european")]
    pub exercise: ExerciseStyle,
}

impl QuoteArgs {
    /// Validated quote parameters.
    pub fn quote(&self) -> Result<QuoteParams> {
        let quote =
            QuoteParams::new(self.spot, self.strike, self.expiry, self.rate, self.option_type)?;
        Ok(quote.with_exercise(self.exercise))
    }
}

/// Full option inputs.
#[derive(Args, Debug, Clone)]
pub struct OptionArgs {
    #[command(flatten)]
    pub quote: QuoteArgs,

    /// Annualised volatility
    #[arg(long)]
    pub volatility: f64,
}

impl OptionArgs {
    /// Validated option parameters.
    pub fn params(&self) -> Result<OptionParams> {
        Ok(self.quote.quote()?.with_volatility(self.volatility)?)
    }
}

/// Input echo attached to JSON reports.
#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    pub spot: f64,
    pub strike: f64,
    pub expiry: f64,
    pub rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    pub option_type: OptionType,
    pub exercise: ExerciseStyle,
}

impl From<&OptionParams> for InputSummary {
    fn from(params: &OptionParams) -> Self {
        Self {
            volatility: Some(params.volatility()),
            ..Self::from(&params.quote())
        }
    }
}

impl From<&QuoteParams> for InputSummary {
    fn from(quote: &QuoteParams) -> Self {
        Self {
            spot: quote.spot(),
            strike: quote.strike(),
            expiry: quote.expiry(),
            rate: quote.rate(),
            volatility: None,
            option_type: quote.option_type(),
            exercise: quote.exercise(),
        }
    }
}
