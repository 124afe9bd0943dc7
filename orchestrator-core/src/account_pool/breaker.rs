//! Per-account circuit breaker: closed -> open -> half-open -> closed/open.

use chrono::Utc;

use crate::model::{AccountStatus, ProviderAccount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

/// Opens the breaker once `consecutive_failures` crosses `threshold`, setting
/// a cooldown that grows with repeated opens (capped).
pub fn maybe_open(account: &mut ProviderAccount, threshold: u32, cooldown_base_secs: i64, cooldown_cap_secs: i64) {
    if account.consecutive_failures < threshold {
        return;
    }
    if account.status == AccountStatus::Open {
        return;
    }
    let prior_opens = account.consecutive_failures / threshold;
    let cooldown = (cooldown_base_secs * 2i64.pow(prior_opens.saturating_sub(1)))
        .min(cooldown_cap_secs);
    account.status = AccountStatus::Open;
    account.opened_at = Some(Utc::now() + chrono::Duration::seconds(cooldown));
}

/// Reads the account's effective breaker state, lazily transitioning
/// `Open` -> `HalfOpen` once `opened_at` has elapsed. Does not mutate the
/// account; callers that act on a `HalfOpen` read should persist the
/// transition via a compare-and-set write.
pub fn current_state(account: &ProviderAccount) -> CircuitState {
    match account.status {
        AccountStatus::Open => match account.opened_at {
            Some(cool_until) if Utc::now() >= cool_until => CircuitState::HalfOpen,
            _ => CircuitState::Open,
        },
        AccountStatus::HalfOpen => CircuitState::HalfOpen,
        _ => CircuitState::Closed,
    }
}
