use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::domain::{Clock, InhibitDecision, InhibitKey, InhibitTable};

/// Shared inhibit table for concurrent request handlers and the daily sweep.
///
/// Every read-modify-write happens under a single lock acquisition.
pub struct Inhibitor {
    clock: Arc<dyn Clock>,
    table: Mutex<InhibitTable>,
}

impl Inhibitor {
    pub fn new(clock: Arc<dyn Clock>, window: Duration) -> Self {
        Self {
            clock,
            table: Mutex::new(InhibitTable::new(window)),
        }
    }

    /// Suppress the key if it has a live window, otherwise start a new one.
    pub async fn admit(&self, key: InhibitKey) -> InhibitDecision {
        // Read the clock only once the lock is held so queued callers never
        // write an older timestamp over a newer renewal.
        let mut table = self.table.lock().await;
        let now = self.clock.now_epoch_seconds();
        table.admit(key, now)
    }

    pub async fn clear_all(&self) -> usize {
        let mut table = self.table.lock().await;
        table.clear_all()
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.len()
    }

    pub async fn last_seen(&self, key: &InhibitKey) -> Option<u64> {
        self.table.lock().await.last_seen(key)
    }
}
