//! Recommend command implementation.

use crate::analytics::Portfolio;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the recommend command.
pub fn run_recommend(portfolio: &str, risk_tolerance: &str, settings: &Settings) -> Result<()> {
    let portfolio: Portfolio = portfolio.parse()?;
    let analytics = super::load_analytics(settings);
    let recommendations = analytics.recommend_adjustments(&portfolio, risk_tolerance);

    if recommendations.is_empty() {
        Output::success(&format!(
            "No adjustments recommended for a {} risk tolerance.",
            risk_tolerance
        ));
        return Ok(());
    }

    Output::header(&format!(
        "Recommendations ({} risk tolerance)",
        risk_tolerance
    ));
    for recommendation in &recommendations {
        Output::list_item(recommendation);
    }
    println!();

    Ok(())
}
