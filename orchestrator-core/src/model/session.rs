use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TenantId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Idle,
    Closed,
}

/// A conversation thread: the unit the Session Manager reads and writes
/// through its two-tier (ephemeral + relational) storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub user_id: Uuid,
    pub status: SessionStatus,
    /// Bounded recent-turn window; the full transcript lives in the
    /// relational tier keyed by `OrchestratorExecution`.
    pub recent_turns: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub last_active_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    pub fn new(tenant_id: TenantId, user_id: Uuid) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            user_id,
            status: SessionStatus::Active,
            recent_turns: Vec::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    /// Appends a turn, keeping only the most recent `max_turns`.
    pub fn push_turn(&mut self, turn: String, max_turns: usize) {
        self.recent_turns.push(turn);
        if self.recent_turns.len() > max_turns {
            let overflow = self.recent_turns.len() - max_turns;
            self.recent_turns.drain(0..overflow);
        }
        self.last_active_at = chrono::Utc::now();
    }
}
