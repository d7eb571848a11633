//! ReAct-style agent: a bounded tool-dispatch loop over the analytics
//! engine.
//!
//! The model thinks in text, requests tools with `Action: <tool>: <args>`
//! lines, and receives results as `Observation:` prompts until it emits an
//! answer or the iteration budget runs out.

mod protocol;
mod runner;
mod tools;

pub use protocol::{classify, AgentStep};
pub use runner::{
    AgentOutcome, AgentRun, AgentRunner, ChatClient, ChatMessage, Role, ToolCallRecord,
    DEFAULT_MAX_ITERATIONS,
};
pub use tools::{parse_tool_call, ToolCall, ToolContext};
