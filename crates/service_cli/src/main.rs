//! optval - European option valuation from market data
//!
//! Operational entry point for the pricing and volatility libraries.
//!
//! # Commands
//!
//! - `optval price` - Price one option from explicit inputs
//! - `optval vol --symbol <ticker>` - Historical volatility of a symbol
//! - `optval chain --symbol <ticker>` - Value every listed strike of a chain
//! - `optval quote --symbol <ticker> --expiry <date|N> --strike <K|#N>` -
//!   Value one listed contract end to end
//! - `optval check` - Show the effective configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer in the A-I-P-S architecture, this crate
//! wires the market data adapters to the pricing kernel.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use commands::chain::ChainArgs;
use commands::price::PriceArgs;
use commands::quote::QuoteArgs;
use commands::vol::VolArgs;
use config::CliConfig;
pub use error::{CliError, Result};

/// European option valuation CLI
#[derive(Parser)]
#[command(name = "optval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to optval.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option from explicit inputs
    Price(PriceArgs),

    /// Estimate annualised historical volatility
    Vol(VolArgs),

    /// Value every listed strike of an option chain
    Chain(ChainArgs),

    /// Value one listed contract from live market data
    Quote(QuoteArgs),

    /// Check configuration
    Check,
}

fn load_config(explicit: Option<&PathBuf>) -> Result<CliConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
    }
    Ok(CliConfig::resolve(explicit.map(PathBuf::as_path))?)
}

fn init_tracing(config: &CliConfig, verbose: bool) {
    let default_level = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn dispatch(command: &Commands, config: &CliConfig) -> Result<()> {
    match command {
        Commands::Price(args) => commands::price::run(args, config),
        Commands::Vol(args) => commands::vol::run(args, config).await,
        Commands::Chain(args) => commands::chain::run(args, config).await,
        Commands::Quote(args) => commands::quote::run(args, config).await,
        Commands::Check => commands::check::run(config),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    init_tracing(&config, cli.verbose);

    debug!(source = ?config.source, period = %config.history_period, "Configuration loaded");

    if let Err(e) = dispatch(&cli.command, &config).await {
        error!(error = %e, "Command failed");
        return Err(e.into());
    }
    Ok(())
}
