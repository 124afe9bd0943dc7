//! Chat-poster tool adapter: lets an agent post a message into a chat thread
//! other than the one that started the request, behind a
//! `ToolConnectionKind::ChatPoster` connection.
//!
//! Grounded on `chat-ingress`'s own platform client; this adapter only needs
//! the bot token and a generic "send text to chat id" HTTP call, so it talks
//! to the Telegram Bot API directly rather than depending on the
//! `chat-ingress` crate (which depends on `orchestrator-core`, not the other
//! way around).

use async_trait::async_trait;
use serde_json::Value;

use crate::model::ToolConnection;

use super::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

pub const TOOL_POST_MESSAGE: &str = "chat_post_message";

pub struct ChatPosterToolSource {
    connection: ToolConnection,
    client: reqwest::Client,
}

impl ChatPosterToolSource {
    pub fn new(connection: ToolConnection) -> Self {
        Self {
            connection,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ToolSource for ChatPosterToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(vec![ToolSpec {
            name: TOOL_POST_MESSAGE.to_string(),
            description: Some(
                "Post a message to a chat thread by external chat id".to_string(),
            ),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "chat_id": { "type": "string" },
                    "text": { "type": "string" },
                },
                "required": ["chat_id", "text"],
            }),
        }])
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        if name != TOOL_POST_MESSAGE {
            return Err(ToolSourceError::NotFound(name.to_string()));
        }
        if !self.connection.enabled {
            return Err(ToolSourceError::CredentialInvalid(
                self.connection.id.to_string(),
            ));
        }
        let chat_id = arguments
            .get("chat_id")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolSourceError::InvalidInput("missing chat_id".into()))?;
        let text = arguments
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolSourceError::InvalidInput("missing text".into()))?;

        let token = &self.connection.encrypted_secret;
        let resp = self
            .client
            .post(format!("https://api.telegram.org/bot{token}/sendMessage"))
            .json(&serde_json::json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await
            .map_err(|e| ToolSourceError::Transport(e.to_string()))?;
        let body = resp
            .text()
            .await
            .map_err(|e| ToolSourceError::Transport(e.to_string()))?;
        Ok(ToolCallContent { text: body })
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
