//! HTTP surface for the orchestrator.
//!
//! `POST /api/orchestrate`, `GET /api/sessions/{id}`, `GET /api/events`
//! (server-push with replay), `GET /health/live`, `GET /health/ready`.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`build_state`].

mod app;
mod convert;
mod error_response;
mod handlers;
mod tenant;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use model_spec_core::CategoryTable;
use orchestrator_core::llm::{ChatOpenAI, LlmClient};
use orchestrator_core::tool_source::ToolSource;
use orchestrator_core::account_pool::SelectionPolicy;
use orchestrator_core::{AccountPool, OrchestratorConfig, SessionManager};
use session_store::SessionStore;
use tokio::sync::Mutex;

pub use app::AppState;

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Builds process state from a resolved config: opens the relational store,
/// connects the ephemeral tier (best-effort; `None` degrades gracefully),
/// and constructs the default OpenAI-compatible LLM client.
pub async fn build_state(
    config: OrchestratorConfig,
    category_table: CategoryTable,
    tool_source: Option<Arc<dyn ToolSource>>,
) -> Result<Arc<AppState>, Box<dyn std::error::Error + Send + Sync>> {
    let store = Arc::new(SessionStore::new(&config.relational_url)?);

    let redis_client = match &config.ephemeral_url {
        Some(url) => match redis::Client::open(url.as_str()) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "failed to construct ephemeral tier client, continuing degraded");
                None
            }
        },
        None => None,
    };

    let ephemeral_conn = match &redis_client {
        Some(client) => client.get_connection_manager().await.ok(),
        None => None,
    };

    let llm: Arc<dyn LlmClient> = Arc::new(ChatOpenAI::new(
        config.llm_base_url.clone(),
        config.llm_api_key.clone(),
        config.default_model.clone(),
    ));

    let sessions = Mutex::new(SessionManager::new(store.clone(), ephemeral_conn));
    let account_pool = Arc::new(AccountPool::new(
        SelectionPolicy::LeastLoaded,
        Some(config.llm_api_key.clone()),
    ));

    Ok(Arc::new(AppState {
        config,
        store,
        sessions,
        category_table: Arc::new(category_table),
        llm,
        tool_source,
        account_pool,
        redis_client,
    }))
}

/// Runs the HTTP surface on an existing listener. Used by tests (bind to
/// `127.0.0.1:0`, then pass the listener in so the OS-assigned port is
/// known before the server starts accepting).
pub async fn run_serve_on_listener(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    info!(%addr, "orchestrator HTTP surface listening");
    let app = app::router(state);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Runs the HTTP surface, binding `addr` (default `127.0.0.1:8080`).
pub async fn run_serve(
    addr: Option<&str>,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = addr.unwrap_or(DEFAULT_ADDR);
    let listener = TcpListener::bind(addr).await?;
    run_serve_on_listener(listener, state).await
}
