//! Expected-return command implementation.

use crate::analytics::Portfolio;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the expected-return command.
pub fn run_expected_return(portfolio: &str, settings: &Settings) -> Result<()> {
    let portfolio: Portfolio = portfolio.parse()?;
    let analytics = super::load_analytics(settings);
    let expected = analytics.expected_return(&portfolio);

    Output::success(&format!("Expected annual return: {:.2}%", expected));

    let total = portfolio.total_allocation();
    if (total - 100.0).abs() > 1e-9 {
        Output::warning(&format!(
            "Allocations sum to {:.1}%, not 100%; the figure scales linearly with the total.",
            total
        ));
    }

    Ok(())
}
