//! Thin HTTP client for the orchestrator's REST+SSE surface. Used by the
//! `orchestrator` binary; kept as a library so the request/response shapes
//! and tenant-header plumbing can be exercised without spawning a process.

pub mod log_format;

use futures_util::StreamExt;
use reqwest_eventsource::{Event, EventSource};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
}

#[derive(Debug, Serialize)]
pub struct SubmitRequest {
    pub prompt: String,
    pub session_id: Option<Uuid>,
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub execution_id: Uuid,
    pub session_id: Uuid,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionSummary {
    pub id: String,
    pub category: String,
    pub status: String,
    pub started_at_ms: i64,
    pub finished_at_ms: Option<i64>,
    pub error_kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub status: String,
    pub recent_turns: Vec<String>,
    pub executions: Vec<ExecutionSummary>,
}

/// Identifies the caller on every request, mirroring the `x-tenant-id`/
/// `x-user-id` header pair the HTTP surface trusts as an upstream identity
/// decision this client does not make on its own.
#[derive(Debug, Clone)]
pub struct Identity {
    pub tenant_id: Uuid,
    pub user_id: Option<Uuid>,
}

pub struct OrchestratorClient {
    base_url: String,
    http: reqwest::Client,
    identity: Identity,
}

impl OrchestratorClient {
    pub fn new(base_url: impl Into<String>, identity: Identity) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            identity,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn with_identity(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.header("x-tenant-id", self.identity.tenant_id.to_string());
        match self.identity.user_id {
            Some(user_id) => builder.header("x-user-id", user_id.to_string()),
            None => builder,
        }
    }

    pub async fn submit(&self, prompt: String, session_id: Option<Uuid>, source: String) -> Result<SubmitResponse, ClientError> {
        let body = SubmitRequest { prompt, session_id, source };
        let request = self.with_identity(self.http.post(self.url("/api/orchestrate"))).json(&body);
        parse_response(request.send().await?).await
    }

    pub async fn session(&self, id: Uuid) -> Result<SessionResponse, ClientError> {
        let request = self.with_identity(self.http.get(self.url(&format!("/api/sessions/{id}"))));
        parse_response(request.send().await?).await
    }

    pub async fn health_ready(&self) -> Result<serde_json::Value, ClientError> {
        let request = self.http.get(self.url("/health/ready"));
        parse_response(request.send().await?).await
    }

    /// Tails the tenant's event stream, invoking `on_event` with each
    /// `data:` payload as it arrives. Runs until the connection closes or
    /// `on_event` returns `false`.
    pub async fn tail_events(&self, mut on_event: impl FnMut(&str) -> bool) -> Result<(), ClientError> {
        let request = self.with_identity(self.http.get(self.url("/api/events")));
        let mut source = EventSource::new(request).map_err(|e| ClientError::Server {
            status: 0,
            body: e.to_string(),
        })?;

        while let Some(event) = source.next().await {
            match event {
                Ok(Event::Open) => {}
                Ok(Event::Message(message)) => {
                    if !on_event(&message.data) {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        Ok(())
    }
}

async fn parse_response<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json::<T>().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Server { status: status.as_u16(), body })
    }
}
