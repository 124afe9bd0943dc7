//! Tool source abstraction: list tools and call a tool.
//!
//! The agent runtime depends on `ToolSource` instead of a concrete tool
//! registry. Implementations here are the four named tool adapters for the
//! orchestrator's external-system connection kinds (`ToolConnection.kind`):
//! `TaskTrackerToolSource`, `NotesToolSource`, `CodeHostToolSource`,
//! `ChatPosterToolSource`, plus `MockToolSource` for tests.

mod chat_poster;
mod code_host;
mod mock;
mod notes;
mod task_tracker;

pub use chat_poster::{ChatPosterToolSource, TOOL_POST_MESSAGE};
pub use code_host::{CodeHostToolSource, TOOL_CREATE_ISSUE, TOOL_SEARCH_ISSUES};
pub use mock::MockToolSource;
pub use notes::{NotesToolSource, TOOL_NOTES_CREATE, TOOL_NOTES_SEARCH};
pub use task_tracker::{
    TaskTrackerToolSource, TOOL_TASK_CREATE, TOOL_TASK_LIST, TOOL_TASK_UPDATE,
};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tool specification, aligned with MCP `tools/list` result item.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Value,
}

/// Result of a single tool call; aligns with MCP `tools/call` content.
#[derive(Debug, Clone)]
pub struct ToolCallContent {
    pub text: String,
}

/// Errors from listing or calling tools.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("credential missing or invalid for connection: {0}")]
    CredentialInvalid(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("JSON-RPC error: {0}")]
    JsonRpc(String),
}

/// Tool source: list tools and call a tool.
///
/// The agent runtime's Act phase depends on this instead of a concrete tool
/// registry. Implementations: `MockToolSource` (tests), `StoreToolSource`,
/// `ShortTermMemoryToolSource`, `McpToolSource`, and the four named adapters
/// behind `ToolConnection` entries (`TaskTrackerToolSource`,
/// `NotesToolSource`, `CodeHostToolSource`, `ChatPosterToolSource`).
#[async_trait]
pub trait ToolSource: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError>;

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError>;

    /// Validate the underlying connection's credential once before a
    /// dispatch round, without performing a full tool call. Adapters backed
    /// by an external system's credential override this; in-process tools
    /// (memory, bash) default to always-valid.
    async fn preflight(&self) -> Result<(), ToolSourceError> {
        Ok(())
    }
}
