use async_trait::async_trait;
use serde_json::Value;

use super::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

/// Fixed-response tool source for tests: always lists the same specs and
/// returns the same content for any call.
pub struct MockToolSource {
    pub specs: Vec<ToolSpec>,
    pub response: String,
}

impl MockToolSource {
    pub fn new(specs: Vec<ToolSpec>, response: impl Into<String>) -> Self {
        Self {
            specs,
            response: response.into(),
        }
    }
}

#[async_trait]
impl ToolSource for MockToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.specs.clone())
    }

    async fn call_tool(
        &self,
        name: &str,
        _arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        if !self.specs.iter().any(|s| s.name == name) {
            return Err(ToolSourceError::NotFound(name.to_string()));
        }
        Ok(ToolCallContent {
            text: self.response.clone(),
        })
    }
}
