use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Clock, NotifyError, Notifier};

// Adjustable time source for deterministic use-case tests.
pub(crate) struct ManualClock(AtomicU64);

impl ManualClock {
    pub(crate) fn new(epoch_seconds: u64) -> Self {
        Self(AtomicU64::new(epoch_seconds))
    }

    pub(crate) fn advance(&self, by: Duration) {
        self.0.fetch_add(by.as_secs(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_epoch_seconds(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

// Notifier that keeps every message it was asked to send.
#[derive(Clone, Default)]
pub(crate) struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<String> {
        self.sent.lock().expect("sent mutex poisoned").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .expect("sent mutex poisoned")
            .push(text.to_string());

        if self.fail {
            return Err(NotifyError::Upstream {
                status: 500,
                body: Some("boom".to_string()),
            });
        }
        Ok(())
    }
}
