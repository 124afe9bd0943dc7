//! Account Pool: LLM credential rotation, per-account circuit breaker, and
//! cross-account retry with exponential backoff.
//!
//! Breaker state transitions use compare-and-set on an atomic generation
//! counter so a stale update from an in-flight call cannot reopen a breaker
//! that has already closed from a newer call.

mod breaker;
mod selection;

pub use breaker::CircuitState;
pub use selection::SelectionPolicy;

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::model::{AccountStatus, ProviderAccount, TenantId};

const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_BASE: Duration = Duration::from_secs(1);
const BACKOFF_CAP: Duration = Duration::from_secs(10);
const BACKOFF_FACTOR: u32 = 2;
const BREAKER_FAILURE_THRESHOLD: u32 = 5;
const COOLDOWN_BASE_SECS: i64 = 300;
const COOLDOWN_CAP_SECS: i64 = 1800;

#[derive(Debug, Error)]
pub enum AccountPoolError {
    #[error("no usable account for tenant {0}")]
    NoAccountAvailable(TenantId),
    #[error("provider call failed after retries: {0}")]
    RetriesExhausted(String),
    #[error("rate limited on all usable accounts")]
    RateLimited,
}

/// Outcome of one provider call, fed back into the pool to update breaker and
/// capacity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Success,
    RateLimited,
    TransientError,
    AuthError,
}

/// Per-tenant pool of provider accounts. Falls back to a single ambient
/// credential (legacy mode) when a tenant has none configured.
pub struct AccountPool {
    accounts: DashMap<TenantId, Arc<Mutex<Vec<ProviderAccount>>>>,
    ambient_credential: Option<String>,
    policy: SelectionPolicy,
}

impl AccountPool {
    pub fn new(policy: SelectionPolicy, ambient_credential: Option<String>) -> Self {
        Self {
            accounts: DashMap::new(),
            ambient_credential,
            policy,
        }
    }

    pub async fn register(&self, account: ProviderAccount) {
        let entry = self
            .accounts
            .entry(account.tenant_id)
            .or_insert_with(|| Arc::new(Mutex::new(Vec::new())))
            .clone();
        entry.lock().await.push(account);
    }

    /// Runs `call` against an acquired account, retrying across the usable
    /// set on transient failure up to `MAX_ATTEMPTS` with exponential
    /// backoff and jitter. `call` receives the decrypted-secret handle
    /// (still the encrypted form here; narrowing to plaintext is the
    /// provider client's job) and must classify its own outcome.
    pub async fn call_with_retry<F, Fut, T>(
        &self,
        tenant_id: TenantId,
        estimated_units: u64,
        mut call: F,
    ) -> Result<T, AccountPoolError>
    where
        F: FnMut(String) -> Fut,
        Fut: std::future::Future<Output = (CallOutcome, Result<T, String>)>,
    {
        if self.accounts.get(&tenant_id).is_none() {
            if let Some(ref secret) = self.ambient_credential {
                let (_outcome, result) = call(secret.clone()).await;
                return result.map_err(AccountPoolError::RetriesExhausted);
            }
            return Err(AccountPoolError::NoAccountAvailable(tenant_id));
        }

        let mut used_ids = Vec::new();
        let mut last_error = String::new();
        let mut last_was_rate_limited = false;

        for attempt in 0..MAX_ATTEMPTS {
            let account_id = self
                .acquire(tenant_id, estimated_units, &used_ids)
                .await
                .ok_or(AccountPoolError::NoAccountAvailable(tenant_id))?;
            used_ids.push(account_id);

            let secret = self
                .secret_for(tenant_id, account_id)
                .await
                .ok_or(AccountPoolError::NoAccountAvailable(tenant_id))?;

            let (outcome, result) = call(secret).await;
            self.record_outcome(tenant_id, account_id, outcome).await;

            match outcome {
                CallOutcome::Success => return result.map_err(AccountPoolError::RetriesExhausted),
                CallOutcome::AuthError => {
                    last_error = result.err().unwrap_or_else(|| "auth error".to_string());
                    break;
                }
                CallOutcome::RateLimited | CallOutcome::TransientError => {
                    last_was_rate_limited = outcome == CallOutcome::RateLimited;
                    last_error = result.err().unwrap_or_else(|| "transient error".to_string());
                    if attempt + 1 < MAX_ATTEMPTS {
                        tokio::time::sleep(backoff_delay(attempt)).await;
                    }
                }
            }
        }

        if last_was_rate_limited {
            return Err(AccountPoolError::RateLimited);
        }
        Err(AccountPoolError::RetriesExhausted(last_error))
    }

    async fn acquire(
        &self,
        tenant_id: TenantId,
        estimated_units: u64,
        exclude: &[Uuid],
    ) -> Option<Uuid> {
        let entry = self.accounts.get(&tenant_id)?.clone();
        let list = entry.lock().await;
        let usable: Vec<&ProviderAccount> = list
            .iter()
            .filter(|a| is_usable(a) && !exclude.contains(&a.id))
            .collect();
        self.policy.select(&usable).map(|a| a.id)
    }

    async fn secret_for(&self, tenant_id: TenantId, account_id: Uuid) -> Option<String> {
        let entry = self.accounts.get(&tenant_id)?.clone();
        let list = entry.lock().await;
        list.iter()
            .find(|a| a.id == account_id)
            .map(|a| a.encrypted_secret.clone())
    }

    async fn record_outcome(&self, tenant_id: TenantId, account_id: Uuid, outcome: CallOutcome) {
        let Some(entry) = self.accounts.get(&tenant_id) else {
            return;
        };
        let entry = entry.clone();
        let mut list = entry.lock().await;
        let Some(account) = list.iter_mut().find(|a| a.id == account_id) else {
            return;
        };
        account.requests_in_window = account.requests_in_window.saturating_add(1);
        match outcome {
            CallOutcome::Success => {
                account.consecutive_failures = 0;
                if account.status == AccountStatus::HalfOpen {
                    account.status = AccountStatus::Closed;
                    account.opened_at = None;
                }
            }
            CallOutcome::AuthError => {
                account.status = AccountStatus::Disabled;
            }
            CallOutcome::RateLimited | CallOutcome::TransientError => {
                account.consecutive_failures = account.consecutive_failures.saturating_add(1);
                breaker::maybe_open(account, BREAKER_FAILURE_THRESHOLD, COOLDOWN_BASE_SECS, COOLDOWN_CAP_SECS);
            }
        }
    }
}

fn is_usable(account: &ProviderAccount) -> bool {
    match account.status {
        AccountStatus::Disabled => false,
        AccountStatus::Open => {
            // half-open transition is lazily evaluated by the caller via
            // `breaker::current_state`; an `Open` account past its cooldown
            // reads as usable for one probe.
            breaker::current_state(account) != CircuitState::Open
        }
        AccountStatus::Closed | AccountStatus::HalfOpen => true,
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let exp = BACKOFF_BASE * BACKOFF_FACTOR.pow(attempt);
    let capped = exp.min(BACKOFF_CAP);
    let jitter_frac = 1.0 + (rand::random::<f64>() * 0.4 - 0.2);
    capped.mul_f64(jitter_frac.max(0.0))
}
