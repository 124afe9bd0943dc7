//! Agent Runtime: one agent's Think -> Act -> Observe loop against an
//! `LlmClient`, bounded by a tool-round budget and a deadline, with
//! cancellation that stops further tool rounds without interrupting an
//! in-flight LLM call.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::aggregator::AgentOutcome;
use crate::error::AgentError;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::{ReActState, ToolResult};
use crate::tool_source::ToolSource;

/// One named persona the dispatcher can run: a scope (brand, marketing,
/// ops, product, engineering, support, growth, finance), a system prompt,
/// and the skills it declares (consumed by the Aggregator's relevance score).
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    pub name: String,
    pub system_prompt: String,
    pub declared_skills: Vec<String>,
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("agent turn failed: {0}")]
    Agent(#[from] AgentError),
    #[error("deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),
}

/// Runs one agent's loop: build the system prompt, call the LLM, execute any
/// requested tool calls, fold results back in, and repeat until the LLM
/// stops asking for tools, the tool-round budget is spent, the deadline
/// elapses, or cancellation is observed.
pub async fn run_agent(
    agent: &AgentDefinition,
    llm: &dyn LlmClient,
    tool_source: Option<&dyn ToolSource>,
    session_snapshot: &[String],
    tool_round_budget: u32,
    deadline: Duration,
    cancellation: CancellationToken,
) -> Result<AgentOutcome, RuntimeError> {
    let mut state = ReActState::default();
    state.messages.push(Message::System(agent.system_prompt.clone()));
    for turn in session_snapshot {
        state.messages.push(Message::User(turn.clone()));
    }

    let result = tokio::time::timeout(
        deadline,
        run_rounds(agent, llm, tool_source, &mut state, tool_round_budget, cancellation),
    )
    .await;

    match result {
        Ok(Ok(())) => Ok(success_outcome(agent, &state)),
        Ok(Err(e)) => Ok(AgentOutcome {
            agent_name: agent.name.clone(),
            failed: true,
            text: e.to_string(),
            self_confidence: 0.0,
            declared_skills: agent.declared_skills.clone(),
            tool_calls_made: state.tool_calls.len() as u32,
        }),
        Err(_) => Err(RuntimeError::DeadlineExceeded(deadline)),
    }
}

async fn run_rounds(
    agent: &AgentDefinition,
    llm: &dyn LlmClient,
    tool_source: Option<&dyn ToolSource>,
    state: &mut ReActState,
    tool_round_budget: u32,
    cancellation: CancellationToken,
) -> Result<(), AgentError> {
    loop {
        if cancellation.is_cancelled() {
            return Err(AgentError::Cancelled);
        }

        // Think: the in-flight LLM call is allowed to complete even if
        // cancellation fires mid-call; only further rounds are skipped.
        let response = llm.invoke(&state.messages).await?;
        state.rounds_taken += 1;
        if !response.content.is_empty() {
            state.messages.push(Message::Assistant(response.content));
        }
        state.tool_calls = response.tool_calls;

        if state.tool_calls.is_empty() {
            return Ok(());
        }

        if cancellation.is_cancelled() || state.rounds_taken >= tool_round_budget {
            return Ok(());
        }

        let Some(tool_source) = tool_source else {
            for call in state.tool_calls.drain(..) {
                state.tool_results.push(ToolResult {
                    call_id: call.id,
                    content: "no tool source configured for this agent".to_string(),
                    is_error: true,
                });
            }
            continue;
        };

        for call in state.tool_calls.drain(..) {
            let outcome = tool_source.call_tool(&call.name, call.arguments).await;
            let result = match outcome {
                Ok(content) => ToolResult {
                    call_id: call.id,
                    content: content.text,
                    is_error: false,
                },
                Err(e) => ToolResult {
                    call_id: call.id,
                    content: e.to_string(),
                    is_error: true,
                },
            };
            state
                .messages
                .push(Message::User(format!("tool result: {}", result.content)));
            state.tool_results.push(result);
        }
    }
}

fn success_outcome(agent: &AgentDefinition, state: &ReActState) -> AgentOutcome {
    AgentOutcome {
        agent_name: agent.name.clone(),
        failed: false,
        text: state.last_assistant_reply().unwrap_or_default().to_string(),
        self_confidence: 0.7,
        declared_skills: agent.declared_skills.clone(),
        tool_calls_made: state.tool_results.len() as u32,
    }
}

/// Convenience wrapper so the dispatcher can share one `Arc<AgentDefinition>`
/// across a fan-out of `run_agent` tasks.
pub type SharedAgentDefinition = Arc<AgentDefinition>;
