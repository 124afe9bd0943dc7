use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, TenantId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Queued,
    Analyzing,
    Dispatched,
    Aggregating,
    Succeeded,
    Failed,
    Cancelled,
}

/// One request's full lifecycle record: the audit row the spec requires
/// every execution to produce (§3 cross-cutting invariants).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorExecution {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub session_id: Uuid,
    pub category: Category,
    pub status: ExecutionStatus,
    pub agent_names: Vec<String>,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
    pub error_kind: Option<String>,
    pub budget_units_spent: u64,
}

impl OrchestratorExecution {
    pub fn new(tenant_id: TenantId, session_id: Uuid, category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            session_id,
            category,
            status: ExecutionStatus::Queued,
            agent_names: Vec::new(),
            started_at: chrono::Utc::now(),
            finished_at: None,
            error_kind: None,
            budget_units_spent: 0,
        }
    }

    pub fn finish(&mut self, status: ExecutionStatus, error_kind: Option<String>) {
        self.status = status;
        self.error_kind = error_kind;
        self.finished_at = Some(chrono::Utc::now());
    }
}
