use serde::{Deserialize, Serialize};

use super::TenantId;

/// A rolling-window spend cap for one tenant. The Dispatcher checks this
/// before starting a new agent turn and the Account Pool debits it after
/// each completed LLM call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub tenant_id: TenantId,
    pub window_units_cap: u64,
    pub window_units_spent: u64,
    pub window_started_at: chrono::DateTime<chrono::Utc>,
    pub window_duration_secs: u64,
}

impl Budget {
    pub fn has_capacity(&self, units: u64) -> bool {
        self.window_units_spent.saturating_add(units) <= self.window_units_cap
    }

    pub fn is_window_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        let elapsed = (now - self.window_started_at).num_seconds().max(0) as u64;
        elapsed >= self.window_duration_secs
    }

    pub fn reset_window(&mut self, now: chrono::DateTime<chrono::Utc>) {
        self.window_units_spent = 0;
        self.window_started_at = now;
    }

    pub fn debit(&mut self, units: u64) {
        self.window_units_spent = self.window_units_spent.saturating_add(units);
    }
}
