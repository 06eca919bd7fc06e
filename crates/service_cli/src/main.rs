//! Pricer CLI - Command Line Front End for the Option Pricing Engine
//!
//! # Commands
//!
//! - `pricer price` - Price one option with a chosen model
//! - `pricer compare` - Price one option with every model
//! - `pricer implied-vol` - Solve for the volatility implied by a market price
//! - `pricer sweep` - Price across values of one input
//! - `pricer payoff --position <file>` - Tabulate a position's value at expiry
//! - `pricer check` - Show the effective configuration
//!
//! # Architecture
//!
//! As the service layer, this crate only parses input, merges configuration
//! and renders results. All pricing happens in the library crates.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::compare::CompareArgs;
use commands::implied_vol::ImpliedVolArgs;
use commands::payoff::PayoffArgs;
use commands::price::PriceArgs;
use commands::sweep::SweepArgs;
use config::{build_config, CliArgs, CliConfig, LogLevel, OutputFormat};

/// Option pricing engine CLI
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./pricer.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one option
    Price(PriceArgs),

    /// Price one option with every model
    Compare(CompareArgs),

    /// Solve for implied volatility
    #[command(name = "implied-vol")]
    ImpliedVol(ImpliedVolArgs),

    /// Sweep one input and reprice
    Sweep(SweepArgs),

    /// Build a payoff diagram for a position file
    Payoff(PayoffArgs),

    /// Check the effective configuration
    Check,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level,
            verbose: self.verbose,
            output_format: self.format,
        }
    }
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn dispatch<W: Write>(command: &Commands, config: &CliConfig, out: &mut W) -> Result<()> {
    let format = config.output_format;
    match command {
        Commands::Price(args) => commands::price::run(args, config, format, out),
        Commands::Compare(args) => commands::compare::run(args, config, format, out),
        Commands::ImpliedVol(args) => commands::implied_vol::run(args, config, format, out),
        Commands::Sweep(args) => commands::sweep::run(args, config, format, out),
        Commands::Payoff(args) => commands::payoff::run(args, format, out),
        Commands::Check => commands::check::run(config, format, out),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli.config_args(), |key| std::env::var(key).ok())?;
    init_tracing(&config);
    debug!(source = ?config.source, "Configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatch(&cli.command, &config, &mut out)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
