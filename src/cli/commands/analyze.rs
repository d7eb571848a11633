//! Analyze command implementation.

use crate::analytics::Portfolio;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the analyze command.
pub fn run_analyze(portfolio: &str, settings: &Settings) -> Result<()> {
    let portfolio: Portfolio = portfolio.parse()?;
    let analytics = super::load_analytics(settings);
    let report = analytics.analyze_diversification(&portfolio)?;

    Output::header("Diversification Report");
    Output::kv("Total allocation", &format!("{:.1}", report.total_allocation));
    Output::kv(
        "Portfolio beta",
        &format!("{:.2}", report.metrics.portfolio_beta),
    );
    Output::kv(
        "Portfolio volatility",
        &format!("{:.2}", report.metrics.portfolio_volatility),
    );
    Output::kv(
        "Sector HHI",
        &format!(
            "{:.2} ({})",
            report.metrics.sector_hhi, report.metrics.concentration
        ),
    );

    Output::header("Sector Breakdown");
    for (sector, allocation) in &report.sector_breakdown {
        Output::breakdown_row(sector, *allocation, report.total_allocation);
    }

    Output::header("Risk Breakdown");
    for (tier, allocation) in &report.risk_breakdown {
        Output::breakdown_row(tier, *allocation, report.total_allocation);
    }
    println!();

    Ok(())
}
