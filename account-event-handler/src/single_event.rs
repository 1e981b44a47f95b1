use std::error::Error as _;

use notifier::Notifier;
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::handler::{EventHandler, ProcessEventError};


#[derive(Debug, Error)]
pub enum SingleEventError {
    #[error("failed to read event: {0}")]
    Read(#[from] std::io::Error),

    #[error("event is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Process(#[from] ProcessEventError),
}

/// Reads one event as JSON from `input` and processes it.
pub async fn handle_single_event<N, R>(handler: &EventHandler<N>, mut input: R) -> Result<(), SingleEventError>
where
    N: Notifier,
    R: AsyncRead + Unpin,
{
    let mut body = String::new();
    input.read_to_string(&mut body).await?;

    let event: Value = serde_json::from_str(&body)?;
    handler.handle(&event).await?;

    Ok(())
}

/// Process exit status for a single-event run: 0 on success, 1 otherwise.
pub fn exit_status(result: &Result<(), SingleEventError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            let cause = err.source().map(|source| source.to_string()).unwrap_or_default();
            tracing::error!("{} ({})", err, cause);
            1
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::testing::{config, delete_bucket_event, RecordingNotifier};

    #[tokio::test]
    async fn valid_event_exits_zero() {
        let handler = EventHandler::new(RecordingNotifier::default(), &config());
        let input = delete_bucket_event().to_string();

        let result = handle_single_event(&handler, input.as_bytes()).await;

        assert!(result.is_ok());
        assert_eq!(exit_status(&result), 0);
        assert_eq!(handler.notifier().calls().len(), 2);
    }

    #[tokio::test]
    async fn invalid_json_exits_one_without_notifying() {
        let handler = EventHandler::new(RecordingNotifier::default(), &config());

        let result = handle_single_event(&handler, &b"{\"detail\": "[..]).await;

        assert!(matches!(result, Err(SingleEventError::Json(_))));
        assert_eq!(exit_status(&result), 1);
        assert!(handler.notifier().calls().is_empty());
    }

    #[tokio::test]
    async fn failed_delivery_exits_one() {
        let notifier = RecordingNotifier { fail_publish: true, ..Default::default() };
        let handler = EventHandler::new(notifier, &config());
        let input = delete_bucket_event().to_string();

        let result = handle_single_event(&handler, input.as_bytes()).await;

        let Err(SingleEventError::Process(err)) = &result else {
            panic!("expected a processing failure, got {:?}", result);
        };
        assert_eq!(err.to_string(), "could not process event");
        assert_eq!(exit_status(&result), 1);
    }
}
