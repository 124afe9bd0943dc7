//! Conversions between `orchestrator-core`'s in-memory model and the
//! relational row shapes `session-store` persists.

use orchestrator_core::model::{ExecutionStatus, OrchestratorExecution};
use session_store::ExecutionRow;

pub fn execution_to_row(execution: &OrchestratorExecution) -> ExecutionRow {
    ExecutionRow {
        id: execution.id.to_string(),
        tenant_id: execution.tenant_id.to_string(),
        session_id: execution.session_id.to_string(),
        category: execution.category.to_string(),
        status: status_str(execution.status).to_string(),
        agent_names_json: serde_json::to_string(&execution.agent_names).unwrap_or_else(|_| "[]".to_string()),
        started_at_ms: execution.started_at.timestamp_millis(),
        finished_at_ms: execution.finished_at.map(|t| t.timestamp_millis()),
        error_kind: execution.error_kind.clone(),
        budget_units_spent: execution.budget_units_spent as i64,
    }
}

fn status_str(status: ExecutionStatus) -> &'static str {
    match status {
        ExecutionStatus::Queued => "queued",
        ExecutionStatus::Analyzing => "analyzing",
        ExecutionStatus::Dispatched => "dispatched",
        ExecutionStatus::Aggregating => "aggregating",
        ExecutionStatus::Succeeded => "succeeded",
        ExecutionStatus::Failed => "failed",
        ExecutionStatus::Cancelled => "cancelled",
    }
}
