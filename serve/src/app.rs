//! Axum app: shared state and route table for the orchestrator's HTTP surface.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use model_spec_core::CategoryTable;
use orchestrator_core::llm::LlmClient;
use orchestrator_core::tool_source::ToolSource;
use orchestrator_core::{AccountPool, OrchestratorConfig, SessionManager};
use session_store::SessionStore;
use tokio::sync::Mutex;

use crate::handlers::{events, health, orchestrate, sessions};

/// Shared, process-wide state handed to every request handler.
pub struct AppState {
    pub config: OrchestratorConfig,
    pub store: Arc<SessionStore>,
    pub sessions: Mutex<SessionManager>,
    pub category_table: Arc<CategoryTable>,
    pub llm: Arc<dyn LlmClient>,
    pub tool_source: Option<Arc<dyn ToolSource>>,
    pub account_pool: Arc<AccountPool>,
    /// Client used to open fresh connections for the progress channel
    /// (command connections and pub/sub subscriptions are separate
    /// `redis` connection kinds). `None` means the ephemeral tier is
    /// unavailable and progress push degrades to polling `GET
    /// /api/sessions/{id}`.
    pub redis_client: Option<redis::Client>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/orchestrate", post(orchestrate::handle))
        .route("/api/sessions/:id", get(sessions::handle))
        .route("/api/events", get(events::handle))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .with_state(state)
}
