//! Agent command implementation.

use crate::agent::{AgentOutcome, AgentRunner, Role, ToolContext};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{load_system_prompt, Settings};
use crate::openai::OpenAiChat;
use anyhow::Result;
use std::sync::Arc;

/// Run the agent command.
pub async fn run_agent(
    question: &str,
    model: Option<String>,
    max_iterations: Option<usize>,
    settings: &Settings,
) -> Result<()> {
    // The missing credential is the one fatal precondition: checked before
    // the loop ever starts. Printed once here, then a plain non-zero exit so
    // main does not repeat the message.
    if let Err(e) = preflight::check(Operation::Agent) {
        Output::error(&format!("{}", e));
        Output::info("Run 'folio doctor' for detailed diagnostics.");
        std::process::exit(1);
    }

    let analytics = Arc::new(super::load_analytics(settings));
    let model = model.unwrap_or_else(|| settings.agent.model.clone());
    let max_iterations = max_iterations.unwrap_or(settings.agent.max_iterations);
    let system_prompt = load_system_prompt(settings);

    let runner = AgentRunner::new(
        OpenAiChat::new(&model),
        ToolContext::new(analytics),
        &system_prompt,
    )
    .with_max_iterations(max_iterations);

    let spinner = Output::spinner("Agent working...");
    let run = runner.run(question).await;
    spinner.finish_and_clear();

    // Iteration trace: assistant turns in order.
    let mut iteration = 0;
    for message in &run.transcript {
        if message.role == Role::Assistant {
            iteration += 1;
            Output::header(&format!("Iteration {}", iteration));
            println!("{}", message.content);
        }
    }
    println!();

    if !run.tool_calls.is_empty() {
        Output::header(&format!("Tool calls ({})", run.tool_calls.len()));
        for call in &run.tool_calls {
            Output::list_item(&format!("{} {}", call.name, truncate(&call.arguments, 60)));
        }
        println!();
    }

    match run.outcome {
        AgentOutcome::Done(_) => {
            Output::success(&format!("Answered in {} iteration(s).", run.iterations));
            Ok(())
        }
        AgentOutcome::TimedOut => {
            Output::warning(&format!(
                "No answer after {} iteration(s); see the trace above.",
                run.iterations
            ));
            Ok(())
        }
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    // Arguments are raw model text; never slice inside a multibyte char.
    let mut end = max_len.saturating_sub(3);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
