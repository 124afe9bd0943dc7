//! Progress event payload types: the `type` + payload half of one
//! `ProgressEvent` (envelope fields are applied separately, see `envelope`).

use serde::Serialize;
use serde_json::Value;

/// One stage of the request-handling pipeline becoming visible to the
/// originating surface. Matches the lifecycle a request moves through:
/// analysis, per-agent dispatch, tool calls, aggregation, and terminal
/// success/error.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEventKind {
    AnalysisStarted,
    AnalysisCompleted {
        category: String,
    },
    AgentStarted {
        agent_name: String,
    },
    AgentMessageChunk {
        agent_name: String,
        content: String,
    },
    AgentToolCall {
        agent_name: String,
        tool_name: String,
    },
    AgentToolResult {
        agent_name: String,
        tool_name: String,
        summary: String,
    },
    AgentFinished {
        agent_name: String,
    },
    AgentFailed {
        agent_name: String,
        error: String,
    },
    AggregationCompleted {
        summary: String,
    },
    ExecutionFailed {
        error_kind: String,
        message: String,
    },
    Custom {
        value: Value,
    },
}

impl ProgressEventKind {
    /// Serializes this event to a JSON object (type + payload only; no envelope).
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
