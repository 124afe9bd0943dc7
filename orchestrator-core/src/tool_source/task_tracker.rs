//! Task-tracker tool adapter: list/create/update items against an external
//! task board, behind a `ToolConnectionKind::TaskTracker` connection.
//!
//! Operation shape follows a list-then-patch pattern over a small JSON item,
//! generalized from an in-process todo list to a remote HTTP task tracker.

use async_trait::async_trait;
use serde_json::Value;

use crate::model::ToolConnection;

use super::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

pub const TOOL_TASK_LIST: &str = "task_list";
pub const TOOL_TASK_CREATE: &str = "task_create";
pub const TOOL_TASK_UPDATE: &str = "task_update";

pub struct TaskTrackerToolSource {
    connection: ToolConnection,
    client: reqwest::Client,
}

impl TaskTrackerToolSource {
    pub fn new(connection: ToolConnection) -> Self {
        Self {
            connection,
            client: reqwest::Client::new(),
        }
    }

    fn base_url(&self) -> Result<&str, ToolSourceError> {
        self.connection
            .endpoint
            .as_deref()
            .ok_or_else(|| ToolSourceError::InvalidInput("task tracker endpoint missing".into()))
    }
}

#[async_trait]
impl ToolSource for TaskTrackerToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(vec![
            ToolSpec {
                name: TOOL_TASK_LIST.to_string(),
                description: Some("List open tasks on the connected task tracker".to_string()),
                input_schema: serde_json::json!({ "type": "object", "properties": {} }),
            },
            ToolSpec {
                name: TOOL_TASK_CREATE.to_string(),
                description: Some("Create a task".to_string()),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": { "title": { "type": "string" } },
                    "required": ["title"],
                }),
            },
            ToolSpec {
                name: TOOL_TASK_UPDATE.to_string(),
                description: Some("Update a task's status".to_string()),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "status": { "type": "string" },
                    },
                    "required": ["id", "status"],
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
        let base = self.base_url()?;
        let resp = match name {
            TOOL_TASK_LIST => self
                .client
                .get(format!("{base}/tasks"))
                .bearer_auth(&self.connection.encrypted_secret)
                .send()
                .await,
            TOOL_TASK_CREATE => self
                .client
                .post(format!("{base}/tasks"))
                .bearer_auth(&self.connection.encrypted_secret)
                .json(&arguments)
                .send()
                .await,
            TOOL_TASK_UPDATE => {
                let id = arguments
                    .get("id")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ToolSourceError::InvalidInput("missing id".into()))?;
                self.client
                    .patch(format!("{base}/tasks/{id}"))
                    .bearer_auth(&self.connection.encrypted_secret)
                    .json(&arguments)
                    .send()
                    .await
            }
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
