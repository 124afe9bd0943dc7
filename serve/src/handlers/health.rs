//! Liveness/readiness probes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::app::AppState;

/// Always 200 while the process is up.
pub async fn live() -> StatusCode {
    StatusCode::OK
}

/// 200 only if the relational tier and (when configured) the ephemeral
/// tier both answer a trivial probe.
pub async fn ready(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    let relational_ok = state.store.list_executions_for_session("__readiness_probe__").await.is_ok();

    let ephemeral_ok = match &state.redis_client {
        None => true,
        Some(client) => match client.get_connection_manager().await {
            Ok(mut conn) => redis::cmd("PING")
                .query_async::<_, String>(&mut conn)
                .await
                .is_ok(),
            Err(_) => false,
        },
    };

    let ready = relational_ok && ephemeral_ok;
    let status = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (
        status,
        Json(serde_json::json!({"relational": relational_ok, "ephemeral": ephemeral_ok})),
    )
}
