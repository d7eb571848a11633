//! Folio CLI entry point.

use anyhow::Result;
use clap::Parser;
use folio::cli::{commands, Cli, Commands};
use folio::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("folio={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // CLI dataset override wins over the config file.
    if let Some(dataset) = &cli.dataset {
        settings.dataset.path = dataset.clone();
    }

    // Execute command
    match &cli.command {
        Commands::Init => {
            commands::run_init(&settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Analyze { portfolio } => {
            commands::run_analyze(portfolio, &settings)?;
        }

        Commands::ExpectedReturn { portfolio } => {
            commands::run_expected_return(portfolio, &settings)?;
        }

        Commands::Recommend {
            portfolio,
            risk_tolerance,
        } => {
            commands::run_recommend(portfolio, risk_tolerance, &settings)?;
        }

        Commands::Profile { ticker } => {
            commands::run_profile(ticker, &settings)?;
        }

        Commands::Agent {
            question,
            model,
            max_iterations,
        } => {
            commands::run_agent(question, model.clone(), *max_iterations, &settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, &settings)?;
        }
    }

    Ok(())
}
