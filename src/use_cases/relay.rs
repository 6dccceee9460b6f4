use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{Alert, AlertError, InhibitDecision, format_alert};
use crate::use_cases::inhibitor::Inhibitor;

/// Toggles read once at startup.
#[derive(Debug, Clone, Copy)]
pub struct RelaySettings {
    /// Drop repeats for the same session while its window is live.
    pub inhibit_enabled: bool,
    /// Kill switch for the outbound chat call.
    pub notifications_enabled: bool,
}

/// What happened to an accepted alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    /// Message handed to the notification worker.
    Queued,
    /// Repeat of a live session window; nothing sent.
    Inhibited,
    /// Passed dedup but outbound notifications are disabled.
    Muted,
    /// Passed dedup but the notification queue rejected the message.
    Dropped,
}

/// Validates alerts, applies dedup and queues chat messages.
pub struct AlertRelay {
    settings: RelaySettings,
    inhibitor: Arc<Inhibitor>,
    outbound_tx: mpsc::Sender<String>,
}

impl AlertRelay {
    pub fn new(
        settings: RelaySettings,
        inhibitor: Arc<Inhibitor>,
        outbound_tx: mpsc::Sender<String>,
    ) -> Self {
        Self {
            settings,
            inhibitor,
            outbound_tx,
        }
    }

    pub fn inhibitor(&self) -> &Arc<Inhibitor> {
        &self.inhibitor
    }

    // The network call happens on the worker; this only decides and enqueues.
    pub async fn handle(&self, body: &[u8]) -> Result<AlertOutcome, AlertError> {
        let alert = Alert::from_slice(body)?;
        let session_name = alert.session_name();

        if self.settings.inhibit_enabled
            && self.inhibitor.admit(alert.inhibit_key()).await == InhibitDecision::Inhibited
        {
            tracing::info!(
                session = %session_name,
                company = ?alert.company.name(),
                "alert inhibited, session already reported."
            );
            return Ok(AlertOutcome::Inhibited);
        }

        tracing::info!(
            session = %session_name,
            data = alert.event_data.as_deref().unwrap_or_default(),
            "accepted alert, forwarding to chat."
        );

        let message = format_alert(&alert);
        tracing::debug!(%message, "formatted chat message.");

        if !self.settings.notifications_enabled {
            tracing::info!(session = %session_name, "notifications disabled, skipping webhook.");
            return Ok(AlertOutcome::Muted);
        }

        match self.outbound_tx.try_send(message) {
            Ok(()) => Ok(AlertOutcome::Queued),
            Err(e) => {
                tracing::error!(
                    session = %session_name,
                    error = %e,
                    "failed to queue notification."
                );
                Ok(AlertOutcome::Dropped)
            }
        }
    }
}
