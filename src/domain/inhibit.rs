// Time-windowed duplicate suppression for session alerts.
//
// Expiry is evaluated lazily when a key is looked up again; the periodic
// `clear_all` sweep bounds growth from keys that never repeat.

use std::collections::HashMap;
use std::time::Duration;

use crate::domain::alert::Company;

/// Dedup identity of an alert: who the session belongs to and which session it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InhibitKey {
    pub company: Company,
    pub session_name: String,
}

impl InhibitKey {
    pub fn new(company: Company, session_name: impl Into<String>) -> Self {
        Self {
            company,
            session_name: session_name.into(),
        }
    }
}

/// Result of offering an alert to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InhibitDecision {
    /// First alert for the key (or the previous window expired); a fresh record was written.
    Admitted,
    /// A live record exists; its window was extended from now.
    Inhibited,
}

/// Mapping from each key to the epoch second its most recent alert arrived.
#[derive(Debug)]
pub struct InhibitTable {
    window_seconds: u64,
    last_seen: HashMap<InhibitKey, u64>,
}

impl InhibitTable {
    pub fn new(window: Duration) -> Self {
        Self {
            window_seconds: window.as_secs(),
            last_seen: HashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }

    /// Returns whether an alert arriving at `now` should be suppressed.
    ///
    /// A live record is renewed to `now`. An expired record is removed and
    /// the key reported as not inhibited, so the caller must `register` it.
    pub fn is_inhibited(&mut self, key: &InhibitKey, now: u64) -> bool {
        let Some(last_seen) = self.last_seen.get_mut(key) else {
            return false;
        };

        if now > last_seen.saturating_add(self.window_seconds) {
            self.last_seen.remove(key);
            return false;
        }

        *last_seen = (*last_seen).max(now);
        true
    }

    /// Inserts a record for `key`. Only call after `is_inhibited` returned false.
    pub fn register(&mut self, key: InhibitKey, now: u64) {
        self.last_seen.insert(key, now);
    }

    /// Check-then-register in one step.
    pub fn admit(&mut self, key: InhibitKey, now: u64) -> InhibitDecision {
        if self.is_inhibited(&key, now) {
            return InhibitDecision::Inhibited;
        }

        self.register(key, now);
        InhibitDecision::Admitted
    }

    /// Removes every record and returns how many were dropped.
    pub fn clear_all(&mut self) -> usize {
        let cleared = self.last_seen.len();
        self.last_seen.clear();
        cleared
    }

    pub fn len(&self) -> usize {
        self.last_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }

    pub fn last_seen(&self, key: &InhibitKey) -> Option<u64> {
        self.last_seen.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: u64 = 60;
    const T0: u64 = 1_700_000_000;

    fn table() -> InhibitTable {
        InhibitTable::new(Duration::from_secs(30 * MINUTE))
    }

    fn acme_pc1() -> InhibitKey {
        InhibitKey::new(Company::Named("Acme".to_string()), "PC1")
    }

    #[test]
    fn when_key_is_unseen_then_is_not_inhibited_and_nothing_is_stored() {
        let mut table = table();

        assert!(!table.is_inhibited(&acme_pc1(), T0));
        assert!(table.is_empty());
    }

    #[test]
    fn when_repeat_arrives_within_window_then_inhibits_and_renews_last_seen() {
        let mut table = table();
        table.register(acme_pc1(), T0);

        assert!(table.is_inhibited(&acme_pc1(), T0 + 5 * MINUTE));
        assert_eq!(table.last_seen(&acme_pc1()), Some(T0 + 5 * MINUTE));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn when_repeats_keep_arriving_then_window_slides_from_each_repeat() {
        let mut table = table();

        assert_eq!(table.admit(acme_pc1(), T0), InhibitDecision::Admitted);
        assert_eq!(
            table.admit(acme_pc1(), T0 + 5 * MINUTE),
            InhibitDecision::Inhibited
        );
        // 34 minutes after the first alert, but only 29 after the renewal.
        assert_eq!(
            table.admit(acme_pc1(), T0 + 34 * MINUTE),
            InhibitDecision::Inhibited
        );
        assert_eq!(
            table.admit(acme_pc1(), T0 + 63 * MINUTE),
            InhibitDecision::Inhibited
        );
    }

    #[test]
    fn when_window_expires_then_record_is_dropped_and_key_is_admitted_again() {
        let mut table = table();

        assert_eq!(table.admit(acme_pc1(), T0), InhibitDecision::Admitted);
        assert_eq!(
            table.admit(acme_pc1(), T0 + 5 * MINUTE),
            InhibitDecision::Inhibited
        );
        // Window now ends at t=35min, so t=40min is past it.
        assert_eq!(
            table.admit(acme_pc1(), T0 + 40 * MINUTE),
            InhibitDecision::Admitted
        );
        assert_eq!(table.last_seen(&acme_pc1()), Some(T0 + 40 * MINUTE));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn when_expired_record_is_checked_then_it_is_removed_lazily() {
        let mut table = table();
        table.register(acme_pc1(), T0);

        assert!(!table.is_inhibited(&acme_pc1(), T0 + 31 * MINUTE));
        assert!(table.is_empty());
    }

    #[test]
    fn when_renewal_carries_an_older_timestamp_then_last_seen_is_kept() {
        let mut table = table();
        table.register(acme_pc1(), T0 + 10 * MINUTE);

        assert!(table.is_inhibited(&acme_pc1(), T0 + 9 * MINUTE));
        assert_eq!(table.last_seen(&acme_pc1()), Some(T0 + 10 * MINUTE));
    }

    #[test]
    fn when_repeat_lands_exactly_on_window_end_then_still_inhibited() {
        let mut table = table();
        table.register(acme_pc1(), T0);

        assert!(table.is_inhibited(&acme_pc1(), T0 + 30 * MINUTE));
    }

    #[test]
    fn when_clear_all_runs_then_every_record_is_removed_regardless_of_window() {
        let mut table = table();
        table.register(acme_pc1(), T0);
        table.register(
            InhibitKey::new(Company::Named("Globex".to_string()), "LAPTOP-7"),
            T0 + MINUTE,
        );

        assert_eq!(table.clear_all(), 2);
        assert!(table.is_empty());
        assert_eq!(
            table.admit(acme_pc1(), T0 + 2 * MINUTE),
            InhibitDecision::Admitted
        );
    }

    #[test]
    fn when_unattributed_sessions_differ_then_each_is_tracked_independently() {
        let mut table = table();
        let first = InhibitKey::new(Company::Unattributed, "SUPPORT-01");
        let second = InhibitKey::new(Company::Unattributed, "SUPPORT-02");

        assert_eq!(table.admit(first.clone(), T0), InhibitDecision::Admitted);
        assert_eq!(table.admit(second.clone(), T0), InhibitDecision::Admitted);
        assert_eq!(table.admit(first, T0 + MINUTE), InhibitDecision::Inhibited);
        assert_eq!(table.admit(second, T0 + MINUTE), InhibitDecision::Inhibited);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn when_same_session_name_belongs_to_different_companies_then_keys_do_not_collide() {
        let mut table = table();
        let named = InhibitKey::new(Company::Named("Acme".to_string()), "PC1");
        let unattributed = InhibitKey::new(Company::Unattributed, "PC1");

        assert_eq!(table.admit(named, T0), InhibitDecision::Admitted);
        assert_eq!(table.admit(unattributed, T0), InhibitDecision::Admitted);
    }
}
