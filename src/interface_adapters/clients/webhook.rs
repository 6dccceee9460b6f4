use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::domain::{NotifyError, Notifier};
use crate::interface_adapters::protocol::WebhookMessage;

// Thin reqwest client for posting messages to the team chat webhook.
#[derive(Clone)]
pub struct WebhookClient {
    http: Client,
    url: Url,
}

impl WebhookClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }
}

#[async_trait]
impl Notifier for WebhookClient {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let res = self
            .http
            .post(self.url.clone())
            .json(&WebhookMessage { text })
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        let status = res.status();

        if !status.is_success() {
            // Keep whatever the chat service said about the rejection.
            let body = res.text().await.ok().filter(|body| !body.is_empty());
            return Err(NotifyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
