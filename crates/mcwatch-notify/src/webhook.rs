//! Chat webhook delivery over HTTP.
//!
//! Posts `{"content": "<text>"}` to the configured URL. The URL carries the
//! webhook secret, so it is never logged.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::Notifier;
use crate::error::DeliveryError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    /// Build a notifier with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::Network(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl Notifier for WebhookNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        debug!(len = text.len(), "posting webhook message");

        let response = self
            .client
            .post(&self.url)
            .json(&WebhookMessage { content: text })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::Network(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }
}
