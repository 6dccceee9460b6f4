use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::Notifier;

// Delivers queued chat messages one at a time until every sender is dropped.
// Failures are logged and swallowed; there is no retry.
pub async fn notification_worker(
    mut outbound_rx: mpsc::Receiver<String>,
    notifier: Arc<dyn Notifier>,
) {
    while let Some(message) = outbound_rx.recv().await {
        match notifier.send(&message).await {
            Ok(()) => tracing::debug!("notification delivered."),
            Err(e) => tracing::error!(error = %e, "notification request failed."),
        }
    }

    tracing::debug!("notification queue closed, worker exiting.");
}
