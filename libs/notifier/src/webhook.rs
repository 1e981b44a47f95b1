use std::time::Duration;

use reqwest::StatusCode;


pub struct ChatWebhook {
    client: reqwest::Client,
}

impl ChatWebhook {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self::new(client))
    }

    /// Sends `{"text": text}` as JSON to the webhook.
    ///
    /// # Returns
    /// * `Ok(status)` - for any HTTP response, error statuses included
    /// * `Err(reqwest::Error)` - only if the request itself could not be completed
    pub async fn send(&self, text: &str, webhook_url: &str) -> Result<StatusCode, reqwest::Error> {
        let payload = serde_json::json!({ "text": text });
        tracing::debug!("Sending chat message payload={} webhook={}", payload, webhook_url);

        let response = self.client
            .post(webhook_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Chat webhook responded with {}", status);
        } else {
            tracing::warn!("Chat webhook responded with {}, not retrying", status);
        }

        Ok(status)
    }
}
