//! The text protocol spoken by the model.
//!
//! The model signals completion by including "Answer" anywhere in a turn,
//! and requests a tool by emitting "PAUSE" together with an action line of
//! the form `Action: <tool_name>: <arguments>`. Every model turn is tagged
//! into exactly one [`AgentStep`] variant, making the "neither marker
//! matched" case explicit instead of silently falling through.

use regex::Regex;
use std::sync::OnceLock;

/// One classified model turn.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentStep {
    /// The model produced a final answer; carries the full response text.
    Answer(String),
    /// The model requested a tool invocation.
    Action { tool: String, args: String },
    /// Neither marker matched, or the action line did not parse.
    Unparseable,
}

/// Keyword marking a final answer.
const ANSWER_MARKER: &str = "Answer";
/// Keyword the model emits while waiting for an observation.
const PAUSE_MARKER: &str = "PAUSE";
/// Keyword introducing a tool request.
const ACTION_MARKER: &str = "Action";

fn action_regex() -> &'static Regex {
    static ACTION_RE: OnceLock<Regex> = OnceLock::new();
    ACTION_RE.get_or_init(|| {
        Regex::new(r"(?i)Action:\s*([a-z_]+):\s*(.+)").expect("action regex is valid")
    })
}

/// Tag a model response as an answer, a tool request, or neither.
///
/// The answer marker wins over an action line when both appear.
pub fn classify(response: &str) -> AgentStep {
    if response.contains(ANSWER_MARKER) {
        return AgentStep::Answer(response.to_string());
    }

    if response.contains(PAUSE_MARKER) && response.contains(ACTION_MARKER) {
        if let Some(captures) = action_regex().captures(response) {
            return AgentStep::Action {
                tool: captures[1].to_lowercase(),
                args: captures[2].trim().to_string(),
            };
        }
    }

    AgentStep::Unparseable
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_terminates() {
        let step = classify("Thought: I know this.\nAnswer: 42");
        assert_eq!(step, AgentStep::Answer("Thought: I know this.\nAnswer: 42".to_string()));
    }

    #[test]
    fn test_answer_wins_over_action() {
        let step = classify("Answer: done. PAUSE Action: get_stock_risk_profile: \"AAPL\"");
        assert!(matches!(step, AgentStep::Answer(_)));
    }

    #[test]
    fn test_action_extraction() {
        let step = classify(
            "Thought: need the profile first.\nAction: get_stock_risk_profile: \"AAPL\"\nPAUSE",
        );
        assert_eq!(
            step,
            AgentStep::Action {
                tool: "get_stock_risk_profile".to_string(),
                args: "\"AAPL\"".to_string(),
            }
        );
    }

    #[test]
    fn test_action_keyword_case_insensitive() {
        let step = classify("PAUSE\naction: analyze_portfolio_diversification: {'AAPL': 100}");
        assert_eq!(
            step,
            AgentStep::Action {
                tool: "analyze_portfolio_diversification".to_string(),
                args: "{'AAPL': 100}".to_string(),
            }
        );
    }

    #[test]
    fn test_pause_without_action_line_is_unparseable() {
        assert_eq!(classify("PAUSE Action but no colon form"), AgentStep::Unparseable);
    }

    #[test]
    fn test_action_without_pause_is_unparseable() {
        assert_eq!(
            classify("Action: get_stock_risk_profile: \"AAPL\""),
            AgentStep::Unparseable
        );
    }

    #[test]
    fn test_plain_chatter_is_unparseable() {
        assert_eq!(classify("Let me think about that."), AgentStep::Unparseable);
    }
}
