//! Fixed-response `LlmClient` for tests and offline demos.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;
use crate::state::ToolCall;

use super::{LlmClient, LlmResponse};

/// Always returns the same content and tool_calls, regardless of input messages.
pub struct MockLlm {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

impl MockLlm {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = tool_calls;
        self
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
        Ok(LlmResponse {
            content: self.content.clone(),
            tool_calls: self.tool_calls.clone(),
            usage: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invoke_returns_fixed_content() {
        let llm = MockLlm::new("hello there");
        let resp = llm.invoke(&[]).await.unwrap();
        assert_eq!(resp.content, "hello there");
        assert!(resp.tool_calls.is_empty());
    }

    #[tokio::test]
    async fn invoke_returns_configured_tool_calls() {
        let call = ToolCall {
            id: "1".to_string(),
            name: "task_list".to_string(),
            arguments: serde_json::json!({}),
        };
        let llm = MockLlm::new("using a tool").with_tool_calls(vec![call]);
        let resp = llm.invoke(&[]).await.unwrap();
        assert_eq!(resp.tool_calls.len(), 1);
        assert_eq!(resp.tool_calls[0].name, "task_list");
    }
}
