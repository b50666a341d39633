//! CLI interface for hashrate-scout
//!
//! Provides subcommands for:
//! - `analyze`: Rank discounted listings from pasted marketplace text
//! - `price`: Show the primary-market reference price for a hashrate
//! - `config`: Show the resolved configuration

mod analyze;
mod price;

pub use analyze::{AnalyzeArgs, OutputFormat};
pub use price::PriceArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hashrate-scout")]
#[command(about = "Discount scanner for secondary-market hashrate NFT listings")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze pasted marketplace text
    Analyze(AnalyzeArgs),
    /// Show the reference price per TH
    Price(PriceArgs),
    /// Show the resolved configuration
    Config,
}
