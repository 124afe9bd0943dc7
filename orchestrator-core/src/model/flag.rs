use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TenantId;

/// A boolean or variant toggle evaluated by the Router and Dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureFlag {
    pub key: String,
    pub description: String,
    pub default_enabled: bool,
}

/// A conditional override for a flag scoped to a matcher (tenant, category, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagRule {
    pub flag_key: String,
    pub tenant_id: Option<TenantId>,
    pub category: Option<String>,
    pub enabled: bool,
    pub priority: i32,
}

/// A one-off override pinned to a single tenant, outliving normal rule evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagOverride {
    pub id: Uuid,
    pub flag_key: String,
    pub tenant_id: TenantId,
    pub enabled: bool,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl FlagOverride {
    pub fn is_active(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        match self.expires_at {
            Some(exp) => now < exp,
            None => true,
        }
    }
}
