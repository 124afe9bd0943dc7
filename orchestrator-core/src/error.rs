//! Agent-level error type used by the LLM client, tool loop, and runner.
//!
//! Request-level errors returned across the HTTP surface live in
//! [`crate::orchestrator_error::OrchestratorError`] instead; this one stays
//! scoped to a single agent turn, matching how the teacher kept `AgentError`
//! narrow and let callers wrap it into richer error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("llm call failed: {0}")]
    Llm(String),

    #[error("tool call failed: {0}")]
    Tool(#[from] crate::tool_source::ToolSourceError),

    #[error("invalid agent state: {0}")]
    State(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}
