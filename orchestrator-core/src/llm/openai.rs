//! OpenAI-compatible chat completions client.
//!
//! Speaks the `/v1/chat/completions` wire shape used by OpenAI and by most
//! self-hosted OpenAI-compatible gateways, so the same client works for any
//! provider registered in an Account Pool entry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::account_pool::CallOutcome;
use crate::error::AgentError;
use crate::message::Message;
use crate::state::ToolCall;

use super::{LlmClient, LlmResponse, LlmUsage};

pub struct ChatOpenAI {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl ChatOpenAI {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: 0.2,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<WireMessage>,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

fn to_wire(message: &Message) -> WireMessage {
    match message {
        Message::System(s) => WireMessage {
            role: "system",
            content: s.clone(),
        },
        Message::User(s) => WireMessage {
            role: "user",
            content: s.clone(),
        },
        Message::Assistant(s) => WireMessage {
            role: "assistant",
            content: s.clone(),
        },
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize, Default)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

#[derive(Deserialize)]
struct WireToolCall {
    id: String,
    function: WireFunctionCall,
}

#[derive(Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

fn classify_status(status: reqwest::StatusCode) -> CallOutcome {
    match status.as_u16() {
        401 | 403 => CallOutcome::AuthError,
        429 => CallOutcome::RateLimited,
        _ => CallOutcome::TransientError,
    }
}

impl ChatOpenAI {
    async fn invoke_inner(&self, messages: &[Message]) -> Result<LlmResponse, (CallOutcome, String)> {
        let body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: messages.iter().map(to_wire).collect(),
        };
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| (CallOutcome::TransientError, e.to_string()))?;

        if !resp.status().is_success() {
            let outcome = classify_status(resp.status());
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err((outcome, format!("status {status}: {text}")));
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| (CallOutcome::TransientError, e.to_string()))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| (CallOutcome::TransientError, "empty choices array".to_string()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .into_iter()
            .map(|tc| -> Result<ToolCall, (CallOutcome, String)> {
                let arguments: Value = serde_json::from_str(&tc.function.arguments).map_err(|e| {
                    (CallOutcome::TransientError, format!("invalid tool arguments json: {e}"))
                })?;
                Ok(ToolCall {
                    id: tc.id,
                    name: tc.function.name,
                    arguments,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            usage: parsed.usage.map(|u| LlmUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }

    /// Same request as `invoke`, but classifies the outcome instead of
    /// collapsing every failure into one error type. Feeds
    /// `AccountPool::call_with_retry`, which needs the distinction to
    /// decide whether to retry, back off, or disable the account.
    pub async fn invoke_with_outcome(&self, messages: &[Message]) -> (CallOutcome, Result<LlmResponse, String>) {
        match self.invoke_inner(messages).await {
            Ok(response) => (CallOutcome::Success, Ok(response)),
            Err((outcome, msg)) => (outcome, Err(msg)),
        }
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        self.invoke_inner(messages).await.map_err(|(_, msg)| AgentError::Llm(msg))
    }
}
