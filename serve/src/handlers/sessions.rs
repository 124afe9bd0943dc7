//! `GET /api/sessions/{id}`: bounded session snapshot plus its execution history.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use orchestrator_core::OrchestratorError;

use crate::app::AppState;
use crate::error_response::ApiError;
use crate::tenant::tenant_from_headers;

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub status: String,
    pub recent_turns: Vec<String>,
    pub executions: Vec<ExecutionSummary>,
}

#[derive(Serialize)]
pub struct ExecutionSummary {
    pub id: String,
    pub category: String,
    pub status: String,
    pub started_at_ms: i64,
    pub finished_at_ms: Option<i64>,
    pub error_kind: Option<String>,
}

pub async fn handle(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let tenant_id = tenant_from_headers(&headers)?;

    let row = state
        .store
        .get_session(&id.to_string())
        .await
        .map_err(|e| OrchestratorError::Validation(format!("no such session: {e}")))?;
    if row.tenant_id != tenant_id.to_string() {
        return Err(OrchestratorError::Auth.into());
    }

    let executions = state
        .store
        .list_executions_for_session(&id.to_string())
        .await
        .map_err(|e| OrchestratorError::Internal(e.to_string()))?
        .into_iter()
        .map(|row| ExecutionSummary {
            id: row.id,
            category: row.category,
            status: row.status,
            started_at_ms: row.started_at_ms,
            finished_at_ms: row.finished_at_ms,
            error_kind: row.error_kind,
        })
        .collect();

    Ok(Json(SessionResponse {
        session_id: id,
        status: row.status,
        // The bounded recent-turn window lives only in the ephemeral tier;
        // the relational row this endpoint reads from doesn't carry it.
        recent_turns: Vec::new(),
        executions,
    }))
}
