//! Progress Channel: publishes one tenant's dispatch events to a pub/sub
//! channel for live fan-out and appends them to a per-tenant persistent
//! stream in the ephemeral tier for replay.
//!
//! Stream key: `events:{tenant}` (Redis stream, rolling TTL). Pub/sub
//! channel: `events.tenant.{tenant}`. Both names are fixed by the logical
//! persisted-state layout; callers never construct them directly.

use progress_event::{to_json, EnvelopeState, ProgressEventKind};
use redis::AsyncCommands;
use thiserror::Error;

const EVENT_STREAM_TTL_SECS: i64 = 3600;
const HEARTBEAT_INTERVAL_SECS: u64 = 25;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("ephemeral tier unavailable: {0}")]
    Transport(String),
    #[error("serializing event: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn stream_key(tenant_id: &str) -> String {
    format!("events:{tenant_id}")
}

fn channel_name(tenant_id: &str) -> String {
    format!("events.tenant.{tenant_id}")
}

/// One execution's publisher: owns the monotonic per-tenant sequence state
/// and a connection to the ephemeral tier.
pub struct ProgressPublisher {
    conn: redis::aio::ConnectionManager,
    state: EnvelopeState,
}

impl ProgressPublisher {
    pub fn new(conn: redis::aio::ConnectionManager, state: EnvelopeState) -> Self {
        Self { conn, state }
    }

    /// Publishes one event: appends to the tenant's persisted stream (source
    /// of truth for replay), refreshes its TTL, then publishes to the
    /// tenant's pub/sub channel for any live subscribers on this or another
    /// process instance.
    pub async fn publish(&mut self, event: ProgressEventKind) -> Result<u64, ProgressError> {
        let value = to_json(&event, &mut self.state)?;
        let sequence = self.state.next_sequence - 1;
        let payload = serde_json::to_string(&value)?;

        let stream_key = stream_key(&self.state.tenant_id);
        let _: String = self
            .conn
            .xadd(&stream_key, sequence.to_string(), &[("payload", payload.clone())])
            .await
            .map_err(|e| ProgressError::Transport(e.to_string()))?;
        let _: () = self
            .conn
            .expire(&stream_key, EVENT_STREAM_TTL_SECS)
            .await
            .map_err(|e| ProgressError::Transport(e.to_string()))?;

        let channel = channel_name(&self.state.tenant_id);
        let _: () = self
            .conn
            .publish(&channel, payload)
            .await
            .map_err(|e| ProgressError::Transport(e.to_string()))?;

        Ok(sequence)
    }

    /// Fetches every persisted event with sequence greater than `resume_from`,
    /// for a reconnecting subscriber's replay window before it switches to live.
    pub async fn replay_since(&mut self, tenant_id: &str, resume_from: u64) -> Result<Vec<String>, ProgressError> {
        let stream_key = stream_key(tenant_id);
        let start = format!("({resume_from}");
        let entries: Vec<(String, Vec<(String, String)>)> = self
            .conn
            .xrange(&stream_key, start, "+")
            .await
            .map_err(|e| ProgressError::Transport(e.to_string()))?;

        Ok(entries
            .into_iter()
            .filter_map(|(_id, fields)| fields.into_iter().find(|(k, _)| k == "payload").map(|(_, v)| v))
            .collect())
    }

    pub fn heartbeat_interval() -> std::time::Duration {
        std::time::Duration::from_secs(HEARTBEAT_INTERVAL_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_key_and_channel_name_are_tenant_scoped() {
        assert_eq!(stream_key("t1"), "events:t1");
        assert_eq!(channel_name("t1"), "events.tenant.t1");
    }

    #[test]
    fn heartbeat_interval_matches_spec_cadence() {
        assert_eq!(ProgressPublisher::heartbeat_interval().as_secs(), 25);
    }
}
