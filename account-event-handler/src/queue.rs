use std::error::Error as _;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_sqs::Client;
use notifier::Notifier;
use serde_json::Value;
use thiserror::Error;

use crate::handler::EventHandler;


#[derive(Debug, Error)]
pub enum QueueError {
    #[error("SQS request failed: {0}")]
    Sqs(#[from] aws_sdk_sqs::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    pub body: Option<String>,
    pub receipt_handle: String,
}

/// Where queued events come from.
#[async_trait]
pub trait EventQueue: Send + Sync {
    async fn receive(&self) -> Result<Option<QueueMessage>, QueueError>;

    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError>;
}

pub struct SqsQueue {
    client: Client,
    queue_url: String,
}

impl SqsQueue {
    pub fn new(client: Client, queue_url: &str) -> Self {
        Self { client, queue_url: queue_url.to_string() }
    }
}

#[async_trait]
impl EventQueue for SqsQueue {
    async fn receive(&self) -> Result<Option<QueueMessage>, QueueError> {
        let rcv_message_output = self.client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(1)
            .send()
            .await
            .map_err(aws_sdk_sqs::Error::from)?;

        let message = rcv_message_output.messages.unwrap_or_default().into_iter().next();

        Ok(message.map(|message| QueueMessage {
            body: message.body,
            receipt_handle: message.receipt_handle.unwrap_or_default(),
        }))
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(aws_sdk_sqs::Error::from)?;

        tracing::debug!("Message deleted successfully");
        Ok(())
    }
}

/// What happened to one received message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Both deliveries succeeded; the message was deleted.
    Processed,
    /// A delivery failed; the message stays on the queue for redelivery.
    Failed,
    /// The body was empty or not JSON; the message was deleted unprocessed.
    Discarded,
}

#[derive(Debug, Error)]
enum BodyError {
    #[error("message has no body")]
    Empty,

    #[error("message body is not JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Processes queued events one at a time until `shutdown` resolves. A
/// shutdown that arrives mid-message takes effect once that message is done.
pub async fn run<N, Q>(handler: &EventHandler<N>, queue: &Q, poll_interval: Duration, shutdown: impl Future<Output = ()>)
where
    N: Notifier,
    Q: EventQueue,
{
    tokio::pin!(shutdown);
    tracing::info!("Polling for account events");

    loop {
        if let Err(err) = poll_once(handler, queue).await {
            tracing::error!("Error polling account event queue: {}", err);
        }

        tokio::select! {
            biased;

            _ = &mut shutdown => {
                tracing::info!("Received shutdown signal, stopping queue worker");
                break;
            }
            _ = tokio::time::sleep(poll_interval) => {}
        }
    }
}

/// Receives at most one message and handles it.
///
/// # Returns
/// * `Ok(None)` - the queue was empty
pub async fn poll_once<N, Q>(handler: &EventHandler<N>, queue: &Q) -> Result<Option<Disposition>, QueueError>
where
    N: Notifier,
    Q: EventQueue,
{
    let Some(message) = queue.receive().await? else {
        return Ok(None);
    };

    let event = match parse_body(message.body.as_deref()) {
        Ok(event) => event,
        Err(err) => {
            tracing::error!("Discarding message: {}", err);
            queue.delete(&message.receipt_handle).await?;
            return Ok(Some(Disposition::Discarded));
        }
    };

    match handler.handle(&event).await {
        Ok(()) => {
            queue.delete(&message.receipt_handle).await?;
            Ok(Some(Disposition::Processed))
        }
        Err(err) => {
            let cause = err.source().map(|source| source.to_string()).unwrap_or_default();
            tracing::error!("{} ({}), leaving message on the queue", err, cause);
            Ok(Some(Disposition::Failed))
        }
    }
}

fn parse_body(body: Option<&str>) -> Result<Value, BodyError> {
    let body = body.filter(|body| !body.trim().is_empty()).ok_or(BodyError::Empty)?;
    Ok(serde_json::from_str(body)?)
}
