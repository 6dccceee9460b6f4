use crate::interface_adapters::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode};
use std::sync::Arc;

// Trigger callbacks only look at the status, so both outcomes have empty bodies.
#[tracing::instrument(name = "alert", skip_all, fields(bytes = body.len()))]
pub async fn receive_alert(State(state): State<Arc<AppState>>, body: Bytes) -> StatusCode {
    tracing::debug!(payload = %String::from_utf8_lossy(&body), "alert payload received.");

    match state.relay.handle(&body).await {
        Ok(outcome) => {
            tracing::debug!(?outcome, "alert handled.");
            StatusCode::OK
        }
        Err(e) => {
            tracing::warn!(reason = %e, "dropping failed request.");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
