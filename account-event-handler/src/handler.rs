use event_interpreter::interpret;
use notifier::{Notifier, NotifyError};
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;


/// The one error an invocation reports. Which delivery failed is only logged;
/// the cause stays reachable through `source()`.
#[derive(Debug, Error)]
#[error("could not process event")]
pub struct ProcessEventError {
    #[source]
    source: NotifyError,
}

pub struct EventHandler<N> {
    notifier: N,
    slack_webhook_url: String,
    sns_topic_arn: String,
}

impl<N: Notifier> EventHandler<N> {
    pub fn new(notifier: N, config: &Config) -> Self {
        Self {
            notifier,
            slack_webhook_url: config.slack_webhook_url.clone(),
            sns_topic_arn: config.sns_topic_arn.clone(),
        }
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Interprets `event`, then sends the chat message and publishes to the
    /// topic, in that order. Nothing is retried.
    pub async fn handle(&self, event: &Value) -> Result<(), ProcessEventError> {
        tracing::info!("Received event {}", event);

        let interpretation = interpret(event);
        if interpretation.is_degraded() {
            tracing::debug!("Event {} could not be summarized, forwarding it raw", interpretation.label());
        }

        let message = interpretation.description.to_string();
        let chat_text = format!("{}: {}", interpretation.label(), message);
        tracing::debug!("chat_text={}", chat_text);

        self.notifier
            .send_chat_message(&chat_text, &self.slack_webhook_url)
            .await
            .map_err(|err| {
                tracing::error!("Failed to send chat message: {}", err);
                ProcessEventError { source: err }
            })?;

        self.notifier
            .publish(interpretation.event_name.as_deref(), &message, &self.sns_topic_arn)
            .await
            .map_err(|err| {
                tracing::error!("Failed to publish to SNS topic: {}", err);
                ProcessEventError { source: err }
            })?;

        tracing::info!("Event {} processed", interpretation.label());
        Ok(())
    }
}
