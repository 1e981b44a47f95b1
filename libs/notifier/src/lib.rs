mod sns;
mod webhook;

use async_trait::async_trait;
use thiserror::Error;

pub use sns::SnsTopic;
pub use webhook::ChatWebhook;


#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("chat webhook request failed: {0}")]
    Webhook(#[from] reqwest::Error),

    #[error("SNS publish failed: {0}")]
    Publish(#[from] aws_sdk_sns::Error),
}

/// The two outbound sinks an interpreted event is delivered to.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// POSTs `text` to the chat webhook at `webhook_url`.
    async fn send_chat_message(&self, text: &str, webhook_url: &str) -> Result<(), NotifyError>;

    /// Publishes `message` to the topic. `subject` is left off when `None`.
    async fn publish(&self, subject: Option<&str>, message: &str, topic_arn: &str) -> Result<(), NotifyError>;
}

/// Production notifier: Slack-style incoming webhook plus an SNS topic.
pub struct AwsNotifier {
    chat: ChatWebhook,
    topic: SnsTopic,
}

impl AwsNotifier {
    pub fn new(chat: ChatWebhook, topic: SnsTopic) -> Self {
        Self { chat, topic }
    }
}

#[async_trait]
impl Notifier for AwsNotifier {
    async fn send_chat_message(&self, text: &str, webhook_url: &str) -> Result<(), NotifyError> {
        self.chat.send(text, webhook_url).await?;
        Ok(())
    }

    async fn publish(&self, subject: Option<&str>, message: &str, topic_arn: &str) -> Result<(), NotifyError> {
        self.topic.publish(subject, message, topic_arn).await?;
        Ok(())
    }
}
