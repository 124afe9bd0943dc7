//! Chat message types shared by the LLM client, agent runtime, and tool loop.

use serde::{Deserialize, Serialize};

/// One turn in a conversation passed to an [`crate::llm::LlmClient`].
///
/// Mirrors the three roles every chat-completion API accepts; tool results are
/// folded into `User` turns by the agent runtime rather than modeled as a
/// fourth variant, since no teacher or pack dependency needs them distinguished
/// at this layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum Message {
    System(String),
    User(String),
    Assistant(String),
}

impl Message {
    pub fn content(&self) -> &str {
        match self {
            Message::System(s) | Message::User(s) | Message::Assistant(s) => s,
        }
    }
}
