//! Profile command implementation.

use crate::analytics::RiskProfile;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the profile command.
pub fn run_profile(ticker: &str, settings: &Settings) -> Result<()> {
    let analytics = super::load_analytics(settings);

    match analytics.risk_profile(ticker) {
        RiskProfile::Found(profile) => {
            Output::header(&format!("{} ({})", profile.name, profile.ticker));
            Output::kv("Sector", &profile.sector);
            Output::kv(
                "Market cap",
                &format!("{} ({})", profile.market_cap_display(), profile.market_cap_tier),
            );
            Output::kv("Risk level", &profile.risk_level);
            Output::kv(
                "Beta",
                &format!("{:.2} ({})", profile.beta, profile.beta_interpretation),
            );
            Output::kv(
                "Volatility index",
                &format!("{:.2} ({})", profile.volatility_index, profile.volatility_label),
            );
            Output::kv("Risk/reward ratio", &profile.risk_reward_display());
            Output::kv(
                "Avg annual return",
                &format!("{:.2}%", profile.avg_annual_return_pct),
            );
            Output::kv("Market performance", profile.market_performance);
            println!();
            println!("  {}", profile.summary);
            println!();
        }
        RiskProfile::NotFound {
            ticker,
            suggestions,
        } => {
            Output::error(&format!("Ticker '{}' not found in the dataset.", ticker));
            if suggestions.is_empty() {
                Output::info("No similar tickers found.");
            } else {
                Output::info("Did you mean:");
                for suggestion in &suggestions {
                    Output::list_item(suggestion);
                }
            }
        }
    }

    Ok(())
}
