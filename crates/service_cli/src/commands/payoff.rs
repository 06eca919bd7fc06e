//! Payoff command implementation
//!
//! Reads a position from JSON and tabulates its value at expiry.
//!
//! ```json
//! { "legs": [
//!     { "option_type": "call", "strike": 95.0, "premium": 7.0, "quantity": 1.0, "side": "long" },
//!     { "option_type": "call", "strike": 105.0, "premium": 2.5, "quantity": 1.0, "side": "short" }
//! ] }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use pricer_risk::payoff::{
    breakeven_points, PayoffAnalyzer, PayoffPoint, Position, SpotRange, DEFAULT_DIAGRAM_POINTS,
};
use serde::Serialize;
use tracing::info;

use crate::config::OutputFormat;
use crate::output::{fmt_value, render, Report};
use crate::{CliError, Result};

/// Relative widening around the strikes when no bounds are given.
const DEFAULT_STRIKE_WIDTH: f64 = 0.5;

/// Arguments of `pricer payoff`.
#[derive(Args, Debug, Clone)]
pub struct PayoffArgs {
    /// JSON file holding the position legs
    #[arg(short, long)]
    pub position: PathBuf,

    /// Lowest terminal spot
    #[arg(long)]
    pub start: Option<f64>,

    /// Highest terminal spot
    #[arg(long)]
    pub end: Option<f64>,

    /// Number of spots
    #[arg(long, default_value_t = DEFAULT_DIAGRAM_POINTS)]
    pub points: usize,
}

/// Output of `pricer payoff`.
#[derive(Debug, Clone, Serialize)]
pub struct PayoffReport {
    pub position: Position,
    pub net_premium: f64,
    pub breakevens: Vec<f64>,
    pub diagram: Vec<PayoffPoint>,
}

impl Report for PayoffReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["spot", "payoff", "profit_loss"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.diagram
            .iter()
            .map(|p| vec![fmt_value(p.spot), fmt_value(p.payoff), fmt_value(p.profit_loss)])
            .collect()
    }

    fn notes(&self) -> Vec<String> {
        let breakevens = if self.breakevens.is_empty() {
            "none in range".to_string()
        } else {
            self.breakevens
                .iter()
                .map(|&b| fmt_value(b))
                .collect::<Vec<_>>()
                .join(", ")
        };
        vec![
            format!("net premium: {}", fmt_value(self.net_premium)),
            format!("breakeven: {}", breakevens),
        ]
    }
}

/// Reads and validates a position file.
pub fn load_position(path: &Path) -> Result<Position> {
    if !path.is_file() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn spot_range(args: &PayoffArgs, position: &Position) -> Result<SpotRange> {
    match (args.start, args.end) {
        (Some(start), Some(end)) => Ok(SpotRange::new(start, end, args.points)?),
        (None, None) => Ok(SpotRange::around_strikes(
            position,
            DEFAULT_STRIKE_WIDTH,
            args.points,
        )?),
        _ => Err(CliError::InvalidArgument(
            "--start and --end must be given together".to_string(),
        )),
    }
}

/// Builds the diagram for a loaded position.
pub fn diagram(args: &PayoffArgs, position: Position) -> Result<PayoffReport> {
    let range = spot_range(args, &position)?;
    info!(legs = position.legs().len(), points = range.points, "Building payoff diagram");

    let diagram = PayoffAnalyzer::payoff_diagram_over(&position, &range)?;
    Ok(PayoffReport {
        net_premium: position.net_premium(),
        breakevens: breakeven_points(&diagram),
        diagram,
        position,
    })
}

/// Run the payoff command
pub fn run<W: Write>(args: &PayoffArgs, format: OutputFormat, out: &mut W) -> Result<()> {
    let position = load_position(&args.position)?;
    let report = diagram(args, position)?;
    render(out, format, &report)
}
