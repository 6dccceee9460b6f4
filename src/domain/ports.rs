use async_trait::async_trait;

use crate::domain::errors::NotifyError;

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_seconds(&self) -> u64;
}

// Port for delivering a formatted message to the team chat.
// The use cases depend on this trait, not on the concrete webhook client.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
