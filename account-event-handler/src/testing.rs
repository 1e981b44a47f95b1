use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use notifier::{Notifier, NotifyError};
use serde_json::{json, Value};

use crate::config::Config;


#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Chat { text: String, webhook_url: String },
    Publish { subject: Option<String>, message: String, topic_arn: String },
}

/// Notifier double that records every call and fails on request.
#[derive(Default)]
pub struct RecordingNotifier {
    pub(crate) calls: Mutex<Vec<Call>>,
    pub fail_chat: bool,
    pub fail_publish: bool,
}

impl RecordingNotifier {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn transport_error() -> NotifyError {
    let err = reqwest::Client::new().get("not a url").build().unwrap_err();
    NotifyError::Webhook(err)
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_chat_message(&self, text: &str, webhook_url: &str) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push(Call::Chat {
            text: text.to_string(),
            webhook_url: webhook_url.to_string(),
        });
        if self.fail_chat { Err(transport_error()) } else { Ok(()) }
    }

    async fn publish(&self, subject: Option<&str>, message: &str, topic_arn: &str) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push(Call::Publish {
            subject: subject.map(str::to_string),
            message: message.to_string(),
            topic_arn: topic_arn.to_string(),
        });
        if self.fail_publish { Err(transport_error()) } else { Ok(()) }
    }
}

pub fn config() -> Config {
    Config {
        slack_webhook_url: "https://hooks.example.com/T/B/X".to_string(),
        sns_topic_arn: "arn:aws:sns:eu-north-1:123:account-events".to_string(),
        event_queue_url: None,
        poll_interval: Duration::from_secs(5),
        webhook_timeout: Duration::from_secs(30),
    }
}

pub fn delete_bucket_event() -> Value {
    json!({
        "source": "aws.s3",
        "detail": {
            "eventName": "DeleteBucket",
            "requestParameters": { "bucketName": "b1" },
            "userIdentity": { "type": "IAMUser", "arn": "arn:aws:iam::123:user/alice" }
        }
    })
}
