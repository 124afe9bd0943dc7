use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TenantId;

/// Which external-system shape a `ToolConnection` speaks. One adapter struct
/// in `crate::tool_source` implements `ToolSource` per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolConnectionKind {
    TaskTracker,
    Notes,
    CodeHost,
    ChatPoster,
}

/// A tenant's credential + endpoint for one external system, handed to the
/// matching tool adapter at dispatch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConnection {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub kind: ToolConnectionKind,
    pub endpoint: Option<String>,
    pub encrypted_secret: String,
    pub enabled: bool,
}
