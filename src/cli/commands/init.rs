//! Init command - first-run setup.
//!
//! Creates the default configuration file and a starter stock dataset so
//! the analytics commands work out of the box.

use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Starter dataset written by `folio init`. Values are indicative, not live
/// market data; users are expected to maintain their own file.
const STARTER_DATASET: &str = r#"{
  "stocks": {
    "AAPL": {
      "name": "Apple",
      "sector": "Technology",
      "beta": 1.2,
      "market_cap": 3000000000000.0,
      "volatility_index": 0.3,
      "estimated_risk": "Medium",
      "avg_annual_return": 0.12
    },
    "GOOGL": {
      "name": "Alphabet",
      "sector": "Technology",
      "beta": 1.1,
      "market_cap": 2000000000000.0,
      "volatility_index": 0.28,
      "estimated_risk": "Medium",
      "avg_annual_return": 0.10
    },
    "MSFT": {
      "name": "Microsoft",
      "sector": "Technology",
      "beta": 0.95,
      "market_cap": 2800000000000.0,
      "volatility_index": 0.25,
      "estimated_risk": "Medium",
      "avg_annual_return": 0.11
    },
    "JNJ": {
      "name": "Johnson & Johnson",
      "sector": "Healthcare",
      "beta": 0.6,
      "market_cap": 400000000000.0,
      "volatility_index": 0.15,
      "estimated_risk": "Low",
      "avg_annual_return": 0.07
    },
    "XOM": {
      "name": "Exxon Mobil",
      "sector": "Energy",
      "beta": 0.9,
      "market_cap": 450000000000.0,
      "volatility_index": 0.32,
      "estimated_risk": "Medium",
      "avg_annual_return": 0.08
    },
    "JPM": {
      "name": "JPMorgan Chase",
      "sector": "Financials",
      "beta": 1.1,
      "market_cap": 500000000000.0,
      "volatility_index": 0.27,
      "estimated_risk": "Medium",
      "avg_annual_return": 0.09
    },
    "TSLA": {
      "name": "Tesla",
      "sector": "Automotive",
      "beta": 2.0,
      "market_cap": 800000000000.0,
      "volatility_index": 0.55,
      "estimated_risk": "High",
      "avg_annual_return": 0.20
    },
    "SPY": {
      "name": "SPDR S&P 500 ETF",
      "sector": "Diversified",
      "beta": 1.0,
      "market_cap": 500000000000.0,
      "volatility_index": 0.18,
      "estimated_risk": "Low",
      "avg_annual_return": 0.10
    }
  }
}
"#;

/// Run the init command.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Folio Setup");
    println!();

    // Step 1: config file.
    println!("{}", style("Step 1: Configuration file").bold().cyan());
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else {
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
    }
    println!();

    // Step 2: starter dataset.
    println!("{}", style("Step 2: Stock dataset").bold().cyan());
    let dataset_path = settings.dataset_path();
    if dataset_path.exists() {
        Output::info(&format!("Dataset exists: {}", dataset_path.display()));
    } else {
        if let Some(parent) = dataset_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&dataset_path, STARTER_DATASET)?;
        Output::success(&format!(
            "Created starter dataset: {}",
            dataset_path.display()
        ));
    }
    println!();

    // Step 3: API key (needed only by the agent).
    println!("{}", style("Step 3: API configuration").bold().cyan());
    if std::env::var("OPENAI_API_KEY").map_or(true, |k| k.is_empty()) {
        Output::warning("OPENAI_API_KEY is not set. The 'folio agent' command needs it.");
        println!(
            "  Set it in your shell configuration: {}",
            style("export OPENAI_API_KEY='sk-...'").green()
        );
        Output::info("All other commands work without an API key.");
    } else {
        Output::success("OpenAI API key is configured!");
    }
    println!();

    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!(
        "  {} Analyze a portfolio",
        style("folio analyze \"AAPL=40,GOOGL=30,SPY=30\"").cyan()
    );
    println!("  {} Inspect a stock", style("folio profile AAPL").cyan());
    println!(
        "  {} Ask the agent",
        style("folio agent \"Is this portfolio too risky for me?\"").cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_dataset_parses() {
        let value: serde_json::Value = serde_json::from_str(STARTER_DATASET).unwrap();
        let stocks = value["stocks"].as_object().unwrap();
        assert!(stocks.len() >= 8);
        assert!(stocks.contains_key("AAPL"));
    }
}
