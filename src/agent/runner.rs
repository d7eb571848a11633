//! The bounded ReAct-style agent loop.
//!
//! One run progresses strictly turn-by-turn: append the latest prompt, call
//! the chat endpoint once, tag the response, and either finish, dispatch a
//! tool and feed its observation back, or nudge the model when the turn
//! matched no protocol marker. The loop owns its conversation state; nothing
//! is shared across runs.

use super::protocol::{classify, AgentStep};
use super::tools::{parse_tool_call, ToolContext};
use crate::error::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Default iteration ceiling for one agent run.
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// Observation fed back when a model turn matched no protocol marker.
const PROTOCOL_NUDGE: &str = "Observation: your last reply matched neither an Answer nor an \
    Action. Reply with either 'Answer: <final answer>' or a tool request of the form \
    'Action: <tool_name>: <arguments>' followed by PAUSE.";

/// Message role in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message in a conversation.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Seam over the text-generation endpoint so the loop is testable with a
/// scripted client.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// One completion over the full ordered message list.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// How an agent run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutcome {
    /// The model produced an answer; carries the full final response.
    Done(String),
    /// The iteration ceiling was exhausted without an answer.
    TimedOut,
}

/// Record of one tool invocation made during a run.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Wire name of the requested tool.
    pub name: String,
    /// Raw argument text as the model wrote it.
    pub arguments: String,
    /// Observation text fed back (tool output or error).
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

/// Result of one agent run.
#[derive(Debug)]
pub struct AgentRun {
    pub outcome: AgentOutcome,
    /// Number of model calls made.
    pub iterations: usize,
    /// Tools invoked, in order.
    pub tool_calls: Vec<ToolCallRecord>,
    /// The full conversation, for iteration-by-iteration display.
    pub transcript: Vec<ChatMessage>,
}

/// Drives a conversation against a chat endpoint, dispatching tool requests
/// to the analytics engine.
pub struct AgentRunner<C: ChatClient> {
    client: C,
    tools: ToolContext,
    system_prompt: String,
    max_iterations: usize,
}

impl<C: ChatClient> AgentRunner<C> {
    /// Create a runner with the default iteration ceiling.
    pub fn new(client: C, tools: ToolContext, system_prompt: &str) -> Self {
        Self {
            client,
            tools,
            system_prompt: system_prompt.to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the maximum number of model calls for one run.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run the loop for one user query.
    pub async fn run(&self, query: &str) -> AgentRun {
        let mut messages = vec![ChatMessage::system(&self.system_prompt)];
        let mut tool_calls = Vec::new();
        let mut next_prompt = query.to_string();

        for iteration in 1..=self.max_iterations {
            messages.push(ChatMessage::user(&next_prompt));

            // One call per turn, no retry: a failed call degrades to a
            // literal error string standing in for the model's response.
            let response = match self.client.complete(&messages).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Chat endpoint call failed: {}", e);
                    format!("Error: unable to reach the model: {}", e)
                }
            };
            messages.push(ChatMessage::assistant(&response));
            debug!("Iteration {}: {} chars", iteration, response.len());

            match classify(&response) {
                AgentStep::Answer(answer) => {
                    return AgentRun {
                        outcome: AgentOutcome::Done(answer),
                        iterations: iteration,
                        tool_calls,
                        transcript: messages,
                    };
                }
                AgentStep::Action { tool, args } => {
                    let observation = match parse_tool_call(&tool, &args) {
                        Ok(call) => match self.tools.execute(&call) {
                            Ok(output) => output,
                            Err(e) => format!("Tool error: {}", e),
                        },
                        Err(e) => format!("Failed to parse tool call: {}", e),
                    };
                    tool_calls.push(ToolCallRecord {
                        name: tool,
                        arguments: args,
                        result: observation.clone(),
                    });
                    next_prompt = format!("Observation: {}", observation);
                }
                AgentStep::Unparseable => {
                    warn!("Model turn matched no protocol marker");
                    next_prompt = PROTOCOL_NUDGE.to_string();
                }
            }
        }

        AgentRun {
            outcome: AgentOutcome::TimedOut,
            iterations: self.max_iterations,
            tool_calls,
            transcript: messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::sample_dataset;
    use crate::analytics::PortfolioAnalytics;
    use crate::error::FolioError;
    use std::sync::Arc;
    use std::sync::Mutex;

    /// Plays back a fixed sequence of responses; errors when exhausted.
    struct ScriptedClient {
        responses: Mutex<Vec<Result<String>>>,
    }

    impl ScriptedClient {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedClient {
        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Err(FolioError::Chat("script exhausted".to_string()));
            }
            responses.remove(0)
        }
    }

    fn runner(responses: Vec<Result<String>>) -> AgentRunner<ScriptedClient> {
        let tools = ToolContext::new(Arc::new(PortfolioAnalytics::new(sample_dataset())));
        AgentRunner::new(ScriptedClient::new(responses), tools, "You are a test agent.")
    }

    #[tokio::test]
    async fn test_answer_terminates_on_first_iteration() {
        let run = runner(vec![Ok("Answer: 42".to_string())])
            .with_max_iterations(10)
            .run("what is the answer?")
            .await;

        assert_eq!(run.outcome, AgentOutcome::Done("Answer: 42".to_string()));
        assert_eq!(run.iterations, 1);
        assert!(run.tool_calls.is_empty());
    }

    #[tokio::test]
    async fn test_action_then_answer_flow() {
        let run = runner(vec![
            Ok("Thought: let me check.\nAction: calculate_expected_portfolio_return: \
                {'AAPL': 100}\nPAUSE"
                .to_string()),
            Ok("Answer: the expected return is 12%.".to_string()),
        ])
        .run("expected return of 100% AAPL?")
        .await;

        assert!(matches!(run.outcome, AgentOutcome::Done(_)));
        assert_eq!(run.iterations, 2);
        assert_eq!(run.tool_calls.len(), 1);
        assert_eq!(run.tool_calls[0].name, "calculate_expected_portfolio_return");
        assert_eq!(
            run.tool_calls[0].result,
            "Expected portfolio return: 12.00%"
        );

        // The observation became the next user prompt.
        let last_user = run
            .transcript
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .unwrap();
        assert!(last_user.content.starts_with("Observation:"));
    }

    #[tokio::test]
    async fn test_times_out_when_budget_exhausted() {
        let run = runner(vec![
            Ok("still thinking".to_string()),
            Ok("hmm".to_string()),
        ])
        .with_max_iterations(2)
        .run("anything?")
        .await;

        assert_eq!(run.outcome, AgentOutcome::TimedOut);
        assert_eq!(run.iterations, 2);
    }

    #[tokio::test]
    async fn test_endpoint_failure_degrades_to_error_turn() {
        let run = runner(vec![
            Err(FolioError::Chat("boom".to_string())),
            Ok("Answer: recovered.".to_string()),
        ])
        .run("hello?")
        .await;

        assert!(matches!(run.outcome, AgentOutcome::Done(_)));
        assert_eq!(run.iterations, 2);
        // The failed call shows up as a literal assistant turn.
        assert!(run
            .transcript
            .iter()
            .any(|m| m.role == Role::Assistant && m.content.contains("unable to reach the model")));
    }

    #[tokio::test]
    async fn test_unparseable_turn_gets_protocol_nudge() {
        let run = runner(vec![
            Ok("I will just ramble.".to_string()),
            Ok("Answer: fine.".to_string()),
        ])
        .run("go")
        .await;

        assert!(matches!(run.outcome, AgentOutcome::Done(_)));
        assert!(run
            .transcript
            .iter()
            .any(|m| m.role == Role::User && m.content.contains("matched neither")));
    }

    #[tokio::test]
    async fn test_bad_tool_args_become_observation() {
        let run = runner(vec![
            Ok("Action: analyze_portfolio_diversification: not json\nPAUSE".to_string()),
            Ok("Answer: ok.".to_string()),
        ])
        .run("analyze")
        .await;

        assert!(matches!(run.outcome, AgentOutcome::Done(_)));
        assert_eq!(run.tool_calls.len(), 1);
        assert!(run.tool_calls[0].result.contains("Failed to parse tool call"));
    }
}
