//! System prompt for the agent loop.

use super::Settings;
use tracing::warn;

/// Built-in system prompt teaching the Thought/Action/PAUSE/Observation
/// protocol and the available tools. Used when no prompt file is configured
/// or the configured file is unreadable.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are an Investment Portfolio Analysis Agent.

You run in a loop of Thought, Action, PAUSE, Observation.
At the end of the loop you output an Answer.

Use Thought to describe your reasoning about the question you have been asked.
Use Action to run one of the tools available to you, then output PAUSE and stop.
Observation will be the result of running that tool.

Your available tools are:

analyze_portfolio_diversification:
e.g. Action: analyze_portfolio_diversification: {"AAPL": 40, "GOOGL": 30, "SPY": 30}
Analyzes a portfolio's sector and risk-tier breakdown, weighted beta and
volatility, and sector concentration (HHI).

calculate_expected_portfolio_return:
e.g. Action: calculate_expected_portfolio_return: {"AAPL": 50, "GOOGL": 50}
Calculates the expected annual return of a portfolio as a percentage.

recommend_portfolio_adjustments:
e.g. Action: recommend_portfolio_adjustments: {"AAPL": 50, "GOOGL": 30, "SPY": 20}, low
Recommends adjustments for a portfolio given a risk tolerance of low, medium, or high.

get_stock_risk_profile:
e.g. Action: get_stock_risk_profile: "AAPL"
Returns the detailed risk profile of a single stock.

Example session:

Question: How risky is a portfolio of 60% AAPL and 40% GOOGL for a low risk tolerance?
Thought: I should analyze the portfolio's diversification first.
Action: analyze_portfolio_diversification: {"AAPL": 60, "GOOGL": 40}
PAUSE

You will be called again with:

Observation: {"total_allocation": 100.0, ...}

You then continue the loop or, when you have enough information:

Answer: This portfolio is highly concentrated in Technology and unsuitable
for a low risk tolerance; consider diversifying into defensive sectors."#;

/// Load the agent system prompt.
///
/// Reads `agent.prompt_file` when configured; falls back to the built-in
/// default if the file is absent or unreadable.
pub fn load_system_prompt(settings: &Settings) -> String {
    let Some(prompt_file) = &settings.agent.prompt_file else {
        return DEFAULT_SYSTEM_PROMPT.to_string();
    };

    let path = Settings::expand_path(prompt_file);
    match std::fs::read_to_string(&path) {
        Ok(content) => content.trim().to_string(),
        Err(e) => {
            warn!(
                "System prompt file {} not readable ({}); using built-in default",
                path.display(),
                e
            );
            DEFAULT_SYSTEM_PROMPT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_prompt_when_unconfigured() {
        let settings = Settings::default();
        assert_eq!(load_system_prompt(&settings), DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let mut settings = Settings::default();
        settings.agent.prompt_file = Some("/nonexistent/prompt.txt".to_string());
        assert_eq!(load_system_prompt(&settings), DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_custom_prompt_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"  custom prompt  \n").unwrap();

        let mut settings = Settings::default();
        settings.agent.prompt_file = Some(file.path().to_string_lossy().to_string());
        assert_eq!(load_system_prompt(&settings), "custom prompt");
    }
}
