use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TenantId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Closed,
    Open,
    HalfOpen,
    Disabled,
}

/// A provider credential slot in the Account Pool. `encrypted_secret` is the
/// Design Notes' "distinct decrypted-secret type" boundary: this struct never
/// holds a decrypted key, only a handle the pool exchanges for one at call
/// time via its credential provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderAccount {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub provider: String,
    pub encrypted_secret: String,
    pub status: AccountStatus,
    pub consecutive_failures: u32,
    pub requests_in_window: u32,
    pub window_started_at: chrono::DateTime<chrono::Utc>,
    pub opened_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl ProviderAccount {
    pub fn new(tenant_id: TenantId, provider: impl Into<String>, encrypted_secret: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            provider: provider.into(),
            encrypted_secret: encrypted_secret.into(),
            status: AccountStatus::Closed,
            consecutive_failures: 0,
            requests_in_window: 0,
            window_started_at: chrono::Utc::now(),
            opened_at: None,
        }
    }
}
