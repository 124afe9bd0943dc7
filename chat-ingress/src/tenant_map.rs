//! Maps a Telegram chat id to an internal `TenantId`/`User`, persisted so
//! the mapping survives a restart. A real deployment would resolve this
//! through the identity/authorization layer; that layer is a separate
//! origin this adapter does not implement, so the mapping here is the
//! simplest thing that keeps one chat pinned to one tenant across runs.

use std::sync::{Arc, Mutex};

use orchestrator_core::model::TenantId;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum TenantMapError {
    #[error("storage: {0}")]
    Storage(String),
}

pub struct TenantMap {
    db: Arc<Mutex<rusqlite::Connection>>,
}

impl TenantMap {
    pub fn new(path: impl AsRef<std::path::Path>) -> Result<Self, TenantMapError> {
        let conn = rusqlite::Connection::open(path).map_err(|e| TenantMapError::Storage(e.to_string()))?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS chat_tenants (
                chat_id INTEGER PRIMARY KEY,
                tenant_id TEXT NOT NULL,
                user_id TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| TenantMapError::Storage(e.to_string()))?;
        Ok(Self { db: Arc::new(Mutex::new(conn)) })
    }

    /// Returns the chat's existing tenant/user pair, or mints and persists a
    /// fresh one on first contact.
    pub async fn resolve(&self, chat_id: i64) -> Result<(TenantId, Uuid), TenantMapError> {
        let db = self.db.clone();
        tokio::task::block_in_place(move || {
            let conn = db.lock().map_err(|_| TenantMapError::Storage("lock".to_string()))?;
            let existing = conn
                .query_row(
                    "SELECT tenant_id, user_id FROM chat_tenants WHERE chat_id = ?1",
                    rusqlite::params![chat_id],
                    |row| {
                        let tenant_id: String = row.get(0)?;
                        let user_id: String = row.get(1)?;
                        Ok((tenant_id, user_id))
                    },
                )
                .ok();

            if let Some((tenant_id, user_id)) = existing {
                let tenant_id = Uuid::parse_str(&tenant_id).map_err(|e| TenantMapError::Storage(e.to_string()))?;
                let user_id = Uuid::parse_str(&user_id).map_err(|e| TenantMapError::Storage(e.to_string()))?;
                return Ok((TenantId(tenant_id), user_id));
            }

            let tenant_id = TenantId::new();
            let user_id = Uuid::new_v4();
            conn.execute(
                "INSERT INTO chat_tenants (chat_id, tenant_id, user_id) VALUES (?1, ?2, ?3)",
                rusqlite::params![chat_id, tenant_id.to_string(), user_id.to_string()],
            )
            .map_err(|e| TenantMapError::Storage(e.to_string()))?;
            Ok((tenant_id, user_id))
        })
    }
}
