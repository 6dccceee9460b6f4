use serde::Serialize;

// Body posted to the chat webhook.
#[derive(Debug, Serialize)]
pub struct WebhookMessage<'a> {
    pub text: &'a str,
}
