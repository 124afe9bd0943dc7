//! SQLite-backed session store: sessions and orchestrator executions.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage: {0}")]
    Storage(String),
    #[error("not found: {0}")]
    NotFound(String),
}

/// A session row as persisted in the relational tier. Mirrors
/// `orchestrator_core::model::Session` minus the bounded recent-turn window,
/// which lives only in the ephemeral tier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionRow {
    pub id: String,
    pub tenant_id: String,
    pub user_id: String,
    pub status: String,
    pub created_at_ms: i64,
    pub last_active_at_ms: i64,
}

/// An execution row: the audit record of one request's full lifecycle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionRow {
    pub id: String,
    pub tenant_id: String,
    pub session_id: String,
    pub category: String,
    pub status: String,
    pub agent_names_json: String,
    pub started_at_ms: i64,
    pub finished_at_ms: Option<i64>,
    pub error_kind: Option<String>,
    pub budget_units_spent: i64,
}

fn system_time_to_i64(t: SystemTime) -> i64 {
    t.duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// SQLite-backed session store. Own DB, independent of the ephemeral tier.
pub struct SessionStore {
    db: Arc<Mutex<rusqlite::Connection>>,
}

impl SessionStore {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let conn =
            rusqlite::Connection::open(&path).map_err(|e| StoreError::Storage(e.to_string()))?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                tenant_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                last_active_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_sessions_tenant ON sessions(tenant_id);

            CREATE TABLE IF NOT EXISTS executions (
                id TEXT PRIMARY KEY,
                tenant_id TEXT NOT NULL,
                session_id TEXT NOT NULL,
                category TEXT NOT NULL,
                status TEXT NOT NULL,
                agent_names_json TEXT NOT NULL,
                started_at INTEGER NOT NULL,
                finished_at INTEGER,
                error_kind TEXT,
                budget_units_spent INTEGER NOT NULL DEFAULT 0,
                FOREIGN KEY (session_id) REFERENCES sessions(id)
            );
            CREATE INDEX IF NOT EXISTS idx_executions_session ON executions(session_id);
            CREATE INDEX IF NOT EXISTS idx_executions_tenant ON executions(tenant_id);
            "#,
        )
        .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    pub async fn upsert_session(&self, row: SessionRow) -> Result<(), StoreError> {
        let db = self.db.clone();
        tokio::task::block_in_place(move || {
            let conn = db.lock().map_err(|_| StoreError::Storage("lock".into()))?;
            conn.execute(
                "INSERT INTO sessions (id, tenant_id, user_id, status, created_at, last_active_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(id) DO UPDATE SET status = excluded.status, last_active_at = excluded.last_active_at",
                rusqlite::params![
                    row.id,
                    row.tenant_id,
                    row.user_id,
                    row.status,
                    row.created_at_ms,
                    row.last_active_at_ms,
                ],
            )
            .map_err(|e| StoreError::Storage(e.to_string()))?;
            Ok(())
        })
    }

    pub async fn get_session(&self, id: &str) -> Result<SessionRow, StoreError> {
        let db = self.db.clone();
        let id = id.to_string();
        tokio::task::block_in_place(move || {
            let conn = db.lock().map_err(|_| StoreError::Storage("lock".into()))?;
            conn.query_row(
                "SELECT id, tenant_id, user_id, status, created_at, last_active_at FROM sessions WHERE id = ?1",
                rusqlite::params![id],
                |row| {
                    Ok(SessionRow {
                        id: row.get(0)?,
                        tenant_id: row.get(1)?,
                        user_id: row.get(2)?,
                        status: row.get(3)?,
                        created_at_ms: row.get(4)?,
                        last_active_at_ms: row.get(5)?,
                    })
                },
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(id.clone()),
                other => StoreError::Storage(other.to_string()),
            })
        })
    }

    pub async fn insert_execution(&self, row: ExecutionRow) -> Result<(), StoreError> {
        let db = self.db.clone();
        tokio::task::block_in_place(move || {
            let conn = db.lock().map_err(|_| StoreError::Storage("lock".into()))?;
            conn.execute(
                "INSERT INTO executions (id, tenant_id, session_id, category, status, agent_names_json, started_at, finished_at, error_kind, budget_units_spent)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                rusqlite::params![
                    row.id,
                    row.tenant_id,
                    row.session_id,
                    row.category,
                    row.status,
                    row.agent_names_json,
                    row.started_at_ms,
                    row.finished_at_ms,
                    row.error_kind,
                    row.budget_units_spent,
                ],
            )
            .map_err(|e| StoreError::Storage(e.to_string()))?;
            Ok(())
        })
    }

    pub async fn finish_execution(
        &self,
        id: &str,
        status: &str,
        error_kind: Option<&str>,
        budget_units_spent: i64,
    ) -> Result<(), StoreError> {
        let db = self.db.clone();
        let id = id.to_string();
        let status = status.to_string();
        let error_kind = error_kind.map(str::to_string);
        let finished_at = system_time_to_i64(SystemTime::now());
        tokio::task::block_in_place(move || {
            let conn = db.lock().map_err(|_| StoreError::Storage("lock".into()))?;
            let updated = conn
                .execute(
                    "UPDATE executions SET status = ?1, error_kind = ?2, finished_at = ?3, budget_units_spent = ?4 WHERE id = ?5",
                    rusqlite::params![status, error_kind, finished_at, budget_units_spent, id],
                )
                .map_err(|e| StoreError::Storage(e.to_string()))?;
            if updated == 0 {
                return Err(StoreError::NotFound(id));
            }
            Ok(())
        })
    }

    pub async fn list_executions_for_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<ExecutionRow>, StoreError> {
        let db = self.db.clone();
        let session_id = session_id.to_string();
        tokio::task::block_in_place(move || {
            let conn = db.lock().map_err(|_| StoreError::Storage("lock".into()))?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, tenant_id, session_id, category, status, agent_names_json, started_at, finished_at, error_kind, budget_units_spent
                     FROM executions WHERE session_id = ?1 ORDER BY started_at ASC",
                )
                .map_err(|e| StoreError::Storage(e.to_string()))?;
            let rows = stmt
                .query_map(rusqlite::params![session_id], |row| {
                    Ok(ExecutionRow {
                        id: row.get(0)?,
                        tenant_id: row.get(1)?,
                        session_id: row.get(2)?,
                        category: row.get(3)?,
                        status: row.get(4)?,
                        agent_names_json: row.get(5)?,
                        started_at_ms: row.get(6)?,
                        finished_at_ms: row.get(7)?,
                        error_kind: row.get(8)?,
                        budget_units_spent: row.get(9)?,
                    })
                })
                .map_err(|e| StoreError::Storage(e.to_string()))?;
            rows.collect::<Result<Vec<_>, _>>()
                .map_err(|e| StoreError::Storage(e.to_string()))
        })
    }
}
