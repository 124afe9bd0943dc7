//! Notes tool adapter: search and create notes against an external wiki,
//! behind a `ToolConnectionKind::Notes` connection.
//!
//! Grounded on `crate::tool_source::web_tools_source::WebToolsSource`'s
//! fetch/search shape, generalized into two named operations instead of one
//! generic HTTP fetcher.

use async_trait::async_trait;
use serde_json::Value;

use crate::model::ToolConnection;

use super::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

pub const TOOL_NOTES_SEARCH: &str = "notes_search";
pub const TOOL_NOTES_CREATE: &str = "notes_create";

pub struct NotesToolSource {
    connection: ToolConnection,
    client: reqwest::Client,
}

impl NotesToolSource {
    pub fn new(connection: ToolConnection) -> Self {
        Self {
            connection,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ToolSource for NotesToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(vec![
            ToolSpec {
                name: TOOL_NOTES_SEARCH.to_string(),
                description: Some("Search notes by free text query".to_string()),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": { "query": { "type": "string" } },
                    "required": ["query"],
                }),
            },
            ToolSpec {
                name: TOOL_NOTES_CREATE.to_string(),
                description: Some("Create a note".to_string()),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "body": { "type": "string" },
                    },
                    "required": ["title", "body"],
                }),
            },
        ])
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        if !self.connection.enabled {
            return Err(ToolSourceError::CredentialInvalid(
                self.connection.id.to_string(),
            ));
        }
        let base = self
            .connection
            .endpoint
            .as_deref()
            .ok_or_else(|| ToolSourceError::InvalidInput("notes endpoint missing".into()))?;
        let resp = match name {
            TOOL_NOTES_SEARCH => {
                let query = arguments
                    .get("query")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ToolSourceError::InvalidInput("missing query".into()))?;
                self.client
                    .get(format!("{base}/notes"))
                    .query(&[("q", query)])
                    .bearer_auth(&self.connection.encrypted_secret)
                    .send()
                    .await
            }
            TOOL_NOTES_CREATE => self
                .client
                .post(format!("{base}/notes"))
                .bearer_auth(&self.connection.encrypted_secret)
                .json(&arguments)
                .send()
                .await,
            other => return Err(ToolSourceError::NotFound(other.to_string())),
        };
        let resp = resp.map_err(|e| ToolSourceError::Transport(e.to_string()))?;
        let text = resp
            .text()
            .await
            .map_err(|e| ToolSourceError::Transport(e.to_string()))?;
        Ok(ToolCallContent { text })
    }

    async fn preflight(&self) -> Result<(), ToolSourceError> {
        if !self.connection.enabled || self.connection.encrypted_secret.is_empty() {
            return Err(ToolSourceError::CredentialInvalid(
                self.connection.id.to_string(),
            ));
        }
        Ok(())
    }
}
