//! Session Manager: keeps conversational context durable and fast across a
//! fast ephemeral key-value tier (`session:{id}`, ttl-bound) and a relational
//! tier holding the canonical row. On hit the ephemeral copy wins; on miss
//! the relational copy is loaded and cached back into the ephemeral tier.
//!
//! Writes are write-through: ephemeral first, then relational. If the
//! ephemeral tier is unavailable the manager degrades to direct relational
//! reads/writes with a logged warning; correctness is preserved, latency rises.

use std::sync::Arc;

use redis::AsyncCommands;
use session_store::{SessionRow, SessionStore, StoreError};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{Session, SessionStatus, TenantId};

const DEFAULT_SESSION_TTL_SECS: i64 = 3600;
pub const DEFAULT_SNAPSHOT_TURNS: usize = 20;

#[derive(Debug, Error)]
pub enum SessionManagerError {
    #[error("relational tier: {0}")]
    Store(#[from] StoreError),
    #[error("session not found for tenant {0}")]
    NotFound(TenantId),
}

fn ephemeral_key(id: Uuid) -> String {
    format!("session:{id}")
}

pub struct SessionManager {
    store: Arc<SessionStore>,
    ephemeral: Option<redis::aio::ConnectionManager>,
}

impl SessionManager {
    pub fn new(store: Arc<SessionStore>, ephemeral: Option<redis::aio::ConnectionManager>) -> Self {
        Self { store, ephemeral }
    }

    /// Creates on miss; rehydrates on hit, preferring an external thread key
    /// lookup (e.g. a chat thread id folded into `recent_turns[0]` metadata
    /// by the caller) over a fresh session.
    pub async fn get_or_create(
        &mut self,
        tenant_id: TenantId,
        user_id: Uuid,
        existing_session_id: Option<Uuid>,
    ) -> Result<Session, SessionManagerError> {
        if let Some(id) = existing_session_id {
            if let Ok(session) = self.load(id, tenant_id).await {
                return Ok(session);
            }
        }

        let session = Session::new(tenant_id, user_id);
        self.persist(&session).await?;
        Ok(session)
    }

    async fn load(&mut self, id: Uuid, tenant_id: TenantId) -> Result<Session, SessionManagerError> {
        if let Some(conn) = self.ephemeral.as_mut() {
            match conn.get::<_, Option<String>>(ephemeral_key(id)).await {
                Ok(Some(raw)) => {
                    if let Ok(session) = serde_json::from_str::<Session>(&raw) {
                        return Ok(session);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "ephemeral tier unavailable on session read, falling back to relational tier");
                }
            }
        }

        let row = self.store.get_session(&id.to_string()).await?;
        let session = row_to_session(row)?;
        if session.tenant_id != tenant_id {
            return Err(SessionManagerError::NotFound(tenant_id));
        }
        self.cache_ephemeral(&session).await;
        Ok(session)
    }

    /// Appends one turn, keeping the bounded recent-turn window, and
    /// refreshes the TTL. Write-through: ephemeral tier first, then
    /// relational.
    pub async fn append_turn(
        &mut self,
        session: &mut Session,
        turn: String,
    ) -> Result<(), SessionManagerError> {
        session.push_turn(turn, DEFAULT_SNAPSHOT_TURNS);
        self.persist(session).await
    }

    /// Returns the last N turns (bounded by `DEFAULT_SNAPSHOT_TURNS` already
    /// at write time).
    pub fn snapshot<'a>(&self, session: &'a Session) -> &'a [String] {
        &session.recent_turns
    }

    async fn persist(&mut self, session: &Session) -> Result<(), SessionManagerError> {
        self.cache_ephemeral(session).await;
        let row = session_to_row(session);
        self.store.upsert_session(row).await?;
        Ok(())
    }

    async fn cache_ephemeral(&mut self, session: &Session) {
        let Some(conn) = self.ephemeral.as_mut() else {
            return;
        };
        let Ok(raw) = serde_json::to_string(session) else {
            return;
        };
        let key = ephemeral_key(session.id);
        if let Err(e) = conn.set_ex::<_, _, ()>(&key, raw, DEFAULT_SESSION_TTL_SECS as u64).await {
            tracing::warn!(error = %e, "ephemeral tier unavailable on session write, relational tier is now the source of truth");
        }
    }
}

fn session_to_row(session: &Session) -> SessionRow {
    SessionRow {
        id: session.id.to_string(),
        tenant_id: session.tenant_id.to_string(),
        user_id: session.user_id.to_string(),
        status: match session.status {
            SessionStatus::Active => "active".to_string(),
            SessionStatus::Idle => "idle".to_string(),
            SessionStatus::Closed => "closed".to_string(),
        },
        created_at_ms: session.created_at.timestamp_millis(),
        last_active_at_ms: session.last_active_at.timestamp_millis(),
    }
}

fn row_to_session(row: SessionRow) -> Result<Session, SessionManagerError> {
    let id = Uuid::parse_str(&row.id).map_err(|e| StoreError::Storage(e.to_string()))?;
    let tenant_uuid = Uuid::parse_str(&row.tenant_id).map_err(|e| StoreError::Storage(e.to_string()))?;
    let user_id = Uuid::parse_str(&row.user_id).map_err(|e| StoreError::Storage(e.to_string()))?;
    let status = match row.status.as_str() {
        "active" => SessionStatus::Active,
        "idle" => SessionStatus::Idle,
        _ => SessionStatus::Closed,
    };
    Ok(Session {
        id,
        tenant_id: TenantId(tenant_uuid),
        user_id,
        status,
        recent_turns: Vec::new(),
        created_at: chrono::DateTime::from_timestamp_millis(row.created_at_ms).unwrap_or_default(),
        last_active_at: chrono::DateTime::from_timestamp_millis(row.last_active_at_ms).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn manager() -> SessionManager {
        let dir = tempdir().unwrap();
        let store = Arc::new(SessionStore::new(dir.path().join("sessions.db")).unwrap());
        SessionManager::new(store, None)
    }

    #[tokio::test]
    async fn get_or_create_creates_a_new_session_without_ephemeral_tier() {
        let mut mgr = manager();
        let tenant_id = TenantId::new();
        let user_id = Uuid::new_v4();
        let session = mgr.get_or_create(tenant_id, user_id, None).await.unwrap();
        assert_eq!(session.tenant_id, tenant_id);
        assert_eq!(session.status, SessionStatus::Active);
    }

    #[tokio::test]
    async fn get_or_create_rehydrates_from_relational_tier_on_miss() {
        let mut mgr = manager();
        let tenant_id = TenantId::new();
        let user_id = Uuid::new_v4();
        let created = mgr.get_or_create(tenant_id, user_id, None).await.unwrap();

        let rehydrated = mgr
            .get_or_create(tenant_id, user_id, Some(created.id))
            .await
            .unwrap();
        assert_eq!(rehydrated.id, created.id);
    }

    #[tokio::test]
    async fn append_turn_respects_bounded_window() {
        let mut mgr = manager();
        let tenant_id = TenantId::new();
        let user_id = Uuid::new_v4();
        let mut session = mgr.get_or_create(tenant_id, user_id, None).await.unwrap();

        for i in 0..(DEFAULT_SNAPSHOT_TURNS + 5) {
            mgr.append_turn(&mut session, format!("turn {i}")).await.unwrap();
        }
        assert_eq!(session.recent_turns.len(), DEFAULT_SNAPSHOT_TURNS);
        assert_eq!(session.recent_turns[0], "turn 5");
    }
}
