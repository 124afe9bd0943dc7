//! Conversation state threaded through one agent's Think -> Act -> Observe loop.

use crate::message::Message;

/// A single tool invocation requested by the LLM in a Think step.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// Result of executing one `ToolCall`, produced by the Act step.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ToolResult {
    pub call_id: String,
    pub content: String,
    pub is_error: bool,
}

/// Conversation messages plus per-round tool calls and results for one agent.
#[derive(Clone, Debug, Default)]
pub struct ReActState {
    pub messages: Vec<Message>,
    pub tool_calls: Vec<ToolCall>,
    pub tool_results: Vec<ToolResult>,
    /// Number of Think rounds taken so far; compared against a category's
    /// `tool_round_budget` to force a final answer.
    pub rounds_taken: u32,
}

impl ReActState {
    pub fn last_assistant_reply(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Assistant(content) => Some(content.as_str()),
            _ => None,
        })
    }
}
