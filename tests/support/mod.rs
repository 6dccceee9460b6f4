// Shared helpers that boot a relay and a fake chat webhook on ephemeral ports.
#![allow(dead_code)]

use alert_relay::RelayConfig;
use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// Local stand-in for the chat service that records every posted body.
#[derive(Clone)]
pub struct FakeWebhook {
    pub url: String,
    received: Arc<Mutex<Vec<Value>>>,
}

impl FakeWebhook {
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().expect("webhook mutex poisoned").clone()
    }

    // Poll until at least `count` bodies arrived or the deadline passes.
    pub async fn wait_for(&self, count: usize) -> Vec<Value> {
        for _ in 0..100 {
            let received = self.received();
            if received.len() >= count {
                return received;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.received()
    }
}

#[derive(Clone)]
struct WebhookState {
    status: StatusCode,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn record(State(state): State<WebhookState>, Json(body): Json<Value>) -> StatusCode {
    state
        .received
        .lock()
        .expect("webhook mutex poisoned")
        .push(body);
    state.status
}

pub async fn spawn_webhook(status: StatusCode) -> FakeWebhook {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().route("/hook", post(record)).with_state(WebhookState {
        status,
        received: received.clone(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral webhook port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("webhook server failed");
    });

    FakeWebhook {
        url: format!("http://{addr}/hook"),
        received,
    }
}

// Start a relay pointed at `webhook_url` and return its base URL.
pub async fn spawn_relay(webhook_url: &str, settings: &[(&str, &str)]) -> String {
    let mut vars: HashMap<String, String> = settings
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    vars.insert("WEBHOOK_URL".to_string(), webhook_url.to_string());
    let config =
        RelayConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid relay config");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral relay port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        alert_relay::run(listener, config).await.expect("relay failed");
    });

    format!("http://{addr}")
}

pub fn alert(company: &str, session: &str) -> Value {
    serde_json::json!({
        "Event": { "Data": "Guest is waiting, no host connected" },
        "Session": {
            "Name": session,
            "Code": "314159",
            "SessionType": "Support",
            "GuestLoggedOnUserName": "jdoe",
            "GuestOperatingSystemName": "Windows 10 Pro",
            "CustomProperty1": company
        }
    })
}
