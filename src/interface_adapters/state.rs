use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::Clock;
use crate::use_cases::AlertRelay;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<AlertRelay>,
}

// Wall-clock time source used outside of tests.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
