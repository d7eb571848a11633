//! CLI module for Folio.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Folio - Portfolio Risk Analysis
///
/// A CLI tool for analyzing investment portfolios, with an optional AI agent
/// that answers free-form questions by calling the local analytics engine.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Path to the stock dataset JSON file (overrides config)
    #[arg(short, long, global = true, env = "FOLIO_DATASET")]
    pub dataset: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Folio with a default config and starter dataset
    Init,

    /// Check configuration, dataset, and API key
    Doctor,

    /// Analyze portfolio diversification
    ///
    /// PORTFOLIO uses the grammar TICKER=WEIGHT[,TICKER=WEIGHT...],
    /// e.g. "AAPL=40,GOOGL=30,SPY=30".
    Analyze {
        /// Portfolio allocation, e.g. "AAPL=40,GOOGL=30,SPY=30"
        portfolio: String,
    },

    /// Calculate the expected annual return of a portfolio
    ExpectedReturn {
        /// Portfolio allocation, e.g. "AAPL=40,GOOGL=30,SPY=30"
        portfolio: String,
    },

    /// Recommend portfolio adjustments for a risk tolerance
    Recommend {
        /// Portfolio allocation, e.g. "AAPL=40,GOOGL=30,SPY=30"
        portfolio: String,

        /// Risk tolerance (low, medium, high)
        #[arg(short, long, default_value = "medium")]
        risk_tolerance: String,
    },

    /// Show the risk profile of a single stock
    Profile {
        /// Ticker symbol, e.g. AAPL
        ticker: String,
    },

    /// Ask the AI agent a free-form portfolio question
    Agent {
        /// The question, e.g. "Is 40% AAPL, 30% GOOGL, 30% SPY too risky for me?"
        question: String,

        /// Chat model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Maximum model calls for this run
        #[arg(long)]
        max_iterations: Option<usize>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
