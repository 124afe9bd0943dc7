//! `GET /api/events`: server-push stream for one tenant. Replays the
//! persisted stream from `Last-Event-Id` (or from the start if absent),
//! then switches to the tenant's live pub/sub channel, interleaved with a
//! heartbeat every 25 seconds.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::{Stream, StreamExt};
use redis::AsyncCommands;

use orchestrator_core::progress::ProgressPublisher;
use orchestrator_core::OrchestratorError;

use crate::app::AppState;
use crate::error_response::ApiError;
use crate::tenant::tenant_from_headers;

pub async fn handle(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let tenant_id = tenant_from_headers(&headers)?;
    let client = state
        .redis_client
        .clone()
        .ok_or_else(|| OrchestratorError::Internal("ephemeral tier is not configured".to_string()))?;

    let last_event_id: u64 = headers
        .get("last-event-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let stream_key = format!("events:{tenant_id}");
    let channel = format!("events.tenant.{tenant_id}");

    let mut command_conn = client
        .get_connection_manager()
        .await
        .map_err(|e| OrchestratorError::Internal(e.to_string()))?;
    let replay: Vec<(String, Vec<(String, String)>)> = command_conn
        .xrange(&stream_key, format!("({last_event_id}"), "+")
        .await
        .unwrap_or_default();

    let mut pubsub = client
        .get_async_pubsub()
        .await
        .map_err(|e| OrchestratorError::Internal(e.to_string()))?;
    pubsub
        .subscribe(&channel)
        .await
        .map_err(|e| OrchestratorError::Internal(e.to_string()))?;

    let stream = async_stream::stream! {
        for (_id, fields) in replay {
            if let Some((_, payload)) = fields.into_iter().find(|(k, _)| k == "payload") {
                yield Ok(Event::default().data(payload));
            }
        }

        let mut heartbeat = tokio::time::interval(ProgressPublisher::heartbeat_interval());
        heartbeat.tick().await; // first tick fires immediately; discard it

        let mut messages = pubsub.on_message();
        loop {
            tokio::select! {
                msg = messages.next() => {
                    let Some(msg) = msg else { break };
                    if let Ok(payload) = msg.get_payload::<String>() {
                        yield Ok(Event::default().data(payload));
                    }
                }
                _ = heartbeat.tick() => {
                    yield Ok(Event::default().event("heartbeat").data("{}"));
                }
            }
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
