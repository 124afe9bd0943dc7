//! Data model entities shared across the orchestrator's components.
//!
//! Plain `serde`-derived structs, mirroring the style of `crate::state::ReActState`:
//! public fields, no behavior beyond small constructors and invariant helpers.
//! Persistence (relational rows, ephemeral hashes) lives in `session-store` and
//! `crate::session`, not here.

mod account;
mod budget;
mod execution;
mod flag;
mod session;
mod tenant;
mod tool_connection;

pub use account::{AccountStatus, ProviderAccount};
pub use budget::Budget;
pub use execution::{ExecutionStatus, OrchestratorExecution};
pub use flag::{FeatureFlag, FlagOverride, FlagRule};
pub use session::{Session, SessionStatus};
pub use tenant::{Tenant, User};
pub use tool_connection::{ToolConnection, ToolConnectionKind};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant-scoped identifier. Every row in the system carries a `tenant_id`;
/// this newtype exists so a bare `Uuid` can't be passed where a tenant id is
/// expected (and vice versa), matching the Design Notes' "give ids distinct
/// types, not bare Uuids" guidance in spirit even though spec.md keeps them
/// as plain ids — kept as a lightweight transparent wrapper so it serializes
/// identically to a `Uuid` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub Uuid);

impl TenantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category assigned by the Request Analyzer and consumed by the Router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    QuickAnswer,
    Research,
    CodeChange,
    SchedulingAction,
    CreativeWriting,
    Unknown,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::QuickAnswer,
            Category::Research,
            Category::CodeChange,
            Category::SchedulingAction,
            Category::CreativeWriting,
            Category::Unknown,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::QuickAnswer => "quick_answer",
            Category::Research => "research",
            Category::CodeChange => "code_change",
            Category::SchedulingAction => "scheduling_action",
            Category::CreativeWriting => "creative_writing",
            Category::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}
