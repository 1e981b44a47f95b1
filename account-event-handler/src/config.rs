use std::env;
use std::time::Duration;

use thiserror::Error;


const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 5;
const DEFAULT_WEBHOOK_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub slack_webhook_url: String,
    pub sns_topic_arn: String,
    /// Poll this SQS queue for events instead of reading one from stdin.
    pub event_queue_url: Option<String>,
    pub poll_interval: Duration,
    pub webhook_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let seconds = |key: &'static str, default: u64| -> Result<Duration, ConfigError> {
            match get(key) {
                None => Ok(Duration::from_secs(default)),
                Some(value) => match value.trim().parse::<u64>() {
                    Ok(0) => Err(ConfigError::Invalid { key, value, reason: "must be greater than zero".to_string() }),
                    Ok(secs) => Ok(Duration::from_secs(secs)),
                    Err(err) => Err(ConfigError::Invalid { key, value, reason: err.to_string() }),
                },
            }
        };

        Ok(Config {
            slack_webhook_url: required("SLACK_WEBHOOK_URL")?,
            sns_topic_arn: required("SNS_TOPIC_ARN")?,
            event_queue_url: get("EVENT_QUEUE_URL"),
            poll_interval: seconds("POLL_INTERVAL_SECONDS", DEFAULT_POLL_INTERVAL_SECONDS)?,
            webhook_timeout: seconds("WEBHOOK_TIMEOUT_SECONDS", DEFAULT_WEBHOOK_TIMEOUT_SECONDS)?,
        })
    }
}
