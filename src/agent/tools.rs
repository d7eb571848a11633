//! Tool definitions and dispatch against the analytics engine.
//!
//! The model requests tools with free-text arguments; parsing converts them
//! into one typed [`ToolCall`] variant per engine operation and validates
//! the parameters before dispatch. Any parse or dispatch failure becomes a
//! textual observation, never an abort of the agent loop.

use crate::analytics::{Portfolio, PortfolioAnalytics, RiskProfile};
use crate::error::{FolioError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Typed tool request, one variant per analytics operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    AnalyzeDiversification { portfolio: Portfolio },
    ExpectedReturn { portfolio: Portfolio },
    RecommendAdjustments { portfolio: Portfolio, risk_tolerance: String },
    RiskProfile { ticker: String },
}

impl ToolCall {
    /// The wire name of the tool.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AnalyzeDiversification { .. } => "analyze_portfolio_diversification",
            Self::ExpectedReturn { .. } => "calculate_expected_portfolio_return",
            Self::RecommendAdjustments { .. } => "recommend_portfolio_adjustments",
            Self::RiskProfile { .. } => "get_stock_risk_profile",
        }
    }
}

/// Models routinely emit single-quoted pseudo-JSON; normalize before the
/// strict parse so the typed schema sees valid JSON.
fn normalize_quotes(raw: &str) -> String {
    raw.replace('\'', "\"")
}

/// Parse a JSON object of ticker allocations into a validated portfolio.
fn parse_portfolio(raw: &str) -> Result<Portfolio> {
    let entries: BTreeMap<String, f64> = serde_json::from_str(&normalize_quotes(raw.trim()))
        .map_err(|e| {
            FolioError::Tool(format!(
                "Expected a JSON object of ticker allocations like {{\"AAPL\": 40, \"SPY\": 60}}: {}",
                e
            ))
        })?;
    let portfolio: Portfolio = entries.into_iter().collect();
    portfolio.validate().map_err(|e| FolioError::Tool(e.to_string()))?;
    Ok(portfolio)
}

/// Strip surrounding quotes from a ticker argument.
fn parse_ticker(raw: &str) -> String {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').to_string()
}

/// Split `{...}, tolerance` into the portfolio object and the trailing
/// risk-tolerance token.
fn split_recommend_args(raw: &str) -> Result<(&str, &str)> {
    let brace_end = raw.rfind('}').ok_or_else(|| {
        FolioError::Tool(
            "Expected a portfolio object followed by a risk tolerance, like {\"AAPL\": 100}, low"
                .to_string(),
        )
    })?;
    let (portfolio_str, rest) = raw.split_at(brace_end + 1);
    let tolerance = rest.trim_start().trim_start_matches(',').trim();
    if tolerance.is_empty() {
        return Err(FolioError::Tool(
            "Missing risk tolerance after the portfolio object (expected low, medium, or high)"
                .to_string(),
        ));
    }
    Ok((portfolio_str, tolerance))
}

/// Parse a named tool request with raw argument text into a typed call.
pub fn parse_tool_call(name: &str, args: &str) -> Result<ToolCall> {
    match name {
        "analyze_portfolio_diversification" => Ok(ToolCall::AnalyzeDiversification {
            portfolio: parse_portfolio(args)?,
        }),
        "calculate_expected_portfolio_return" => Ok(ToolCall::ExpectedReturn {
            portfolio: parse_portfolio(args)?,
        }),
        "recommend_portfolio_adjustments" => {
            let (portfolio_str, tolerance) = split_recommend_args(args)?;
            Ok(ToolCall::RecommendAdjustments {
                portfolio: parse_portfolio(portfolio_str)?,
                risk_tolerance: tolerance.to_lowercase(),
            })
        }
        "get_stock_risk_profile" => Ok(ToolCall::RiskProfile {
            ticker: parse_ticker(args),
        }),
        other => Err(FolioError::Tool(format!("Unknown tool: {}", other))),
    }
}

/// Tool execution context over a shared read-only analytics engine.
pub struct ToolContext {
    analytics: Arc<PortfolioAnalytics>,
}

impl ToolContext {
    pub fn new(analytics: Arc<PortfolioAnalytics>) -> Self {
        Self { analytics }
    }

    /// Execute a typed tool call, rendering the result as observation text.
    pub fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::AnalyzeDiversification { portfolio } => {
                let report = self
                    .analytics
                    .analyze_diversification(portfolio)
                    .map_err(|e| FolioError::Tool(e.to_string()))?;
                Ok(serde_json::to_string_pretty(&report)?)
            }
            ToolCall::ExpectedReturn { portfolio } => {
                let expected = self.analytics.expected_return(portfolio);
                Ok(format!("Expected portfolio return: {:.2}%", expected))
            }
            ToolCall::RecommendAdjustments {
                portfolio,
                risk_tolerance,
            } => {
                let recommendations = self
                    .analytics
                    .recommend_adjustments(portfolio, risk_tolerance);
                if recommendations.is_empty() {
                    Ok("No adjustments recommended for this portfolio.".to_string())
                } else {
                    Ok(recommendations.join("\n"))
                }
            }
            ToolCall::RiskProfile { ticker } => {
                let profile: RiskProfile = self.analytics.risk_profile(ticker);
                Ok(serde_json::to_string_pretty(&profile)?)
            }
        }
    }
}
