//! Folio - Portfolio Risk Analysis
//!
//! A CLI tool for analyzing investment portfolios, with an optional
//! ReAct-style AI agent that answers free-form questions by calling the
//! local analytics engine as tools.
//!
//! # Overview
//!
//! Folio lets you:
//! - Analyze a portfolio's diversification across sectors and risk tiers
//! - Calculate expected annual returns
//! - Get rule-based adjustment recommendations for a risk tolerance
//! - Inspect single-stock risk profiles
//! - Ask an AI agent free-form questions that it answers with those tools
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and system-prompt management
//! - `dataset` - Stock reference dataset loading
//! - `analytics` - The portfolio analytics engine (pure computation)
//! - `agent` - The bounded ReAct tool-dispatch loop
//! - `openai` - Chat-completions client
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use folio::analytics::{Portfolio, PortfolioAnalytics};
//! use folio::dataset::Dataset;
//!
//! fn main() -> anyhow::Result<()> {
//!     let analytics = PortfolioAnalytics::new(Dataset::load("stocks.json"));
//!     let portfolio: Portfolio = "AAPL=40,GOOGL=30,SPY=30".parse()?;
//!
//!     let report = analytics.analyze_diversification(&portfolio)?;
//!     println!("Portfolio beta: {}", report.metrics.portfolio_beta);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod analytics;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod openai;

pub use error::{FolioError, Result};
