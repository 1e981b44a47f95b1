mod config;
mod handler;
mod queue;
mod single_event;
#[cfg(test)]
mod testing;

use std::process::ExitCode;

use notifier::{AwsNotifier, ChatWebhook, SnsTopic};
use tracing_subscriber::EnvFilter;

use config::Config;
use handler::EventHandler;
use queue::SqsQueue;


#[tokio::main]
async fn main() -> ExitCode {

    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();


    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!("SNS_TOPIC_ARN={}", config.sns_topic_arn);
    tracing::debug!("SLACK_WEBHOOK_URL={}", config.slack_webhook_url);

    let aws_config = aws_config::load_from_env().await;

    let chat = match ChatWebhook::with_timeout(config.webhook_timeout) {
        Ok(chat) => chat,
        Err(err) => {
            tracing::error!("Failed to build webhook client: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let topic = SnsTopic::new(aws_sdk_sns::Client::new(&aws_config));
    let handler = EventHandler::new(AwsNotifier::new(chat, topic), &config);

    match config.event_queue_url.as_deref() {
        Some(queue_url) => {
            let queue = SqsQueue::new(aws_sdk_sqs::Client::new(&aws_config), queue_url);
            let shutdown = async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for shutdown signal: {}", err);
                    std::future::pending::<()>().await;
                }
            };
            queue::run(&handler, &queue, config.poll_interval, shutdown).await;
            ExitCode::SUCCESS
        }
        None => {
            let result = single_event::handle_single_event(&handler, tokio::io::stdin()).await;
            ExitCode::from(single_event::exit_status(&result))
        }
    }
}
