//! Account selection policies evaluated over the usable set for one tenant.

use crate::model::ProviderAccount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Lowest `requests_in_window` first.
    LeastLoaded,
    /// Oldest `window_started_at` first (least-recently-used).
    RoundRobin,
    /// Falls back to `LeastLoaded`: this pool does not model a quota tier
    /// per account, so there is no distinct ranking to apply here.
    TierPreferred,
}

impl SelectionPolicy {
    pub fn select<'a>(&self, usable: &[&'a ProviderAccount]) -> Option<&'a ProviderAccount> {
        match self {
            SelectionPolicy::LeastLoaded | SelectionPolicy::TierPreferred => usable
                .iter()
                .min_by_key(|a| a.requests_in_window)
                .copied(),
            SelectionPolicy::RoundRobin => usable
                .iter()
                .min_by_key(|a| a.window_started_at)
                .copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TenantId;

    fn account(requests: u32) -> ProviderAccount {
        let mut a = ProviderAccount::new(TenantId::new(), "openai", "sk");
        a.requests_in_window = requests;
        a
    }

    #[test]
    fn least_loaded_picks_lowest_request_count() {
        let a = account(10);
        let b = account(2);
        let usable = vec![&a, &b];
        let picked = SelectionPolicy::LeastLoaded.select(&usable).unwrap();
        assert_eq!(picked.requests_in_window, 2);
    }

    #[test]
    fn select_returns_none_for_empty_usable_set() {
        let usable: Vec<&ProviderAccount> = vec![];
        assert!(SelectionPolicy::LeastLoaded.select(&usable).is_none());
    }
}
