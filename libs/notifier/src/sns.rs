use aws_sdk_sns::Client;


pub struct SnsTopic {
    client: Client,
}

impl SnsTopic {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Publishes `message` to `topic_arn`, returning the SNS message id.
    pub async fn publish(&self, subject: Option<&str>, message: &str, topic_arn: &str) -> Result<Option<String>, aws_sdk_sns::Error> {
        tracing::debug!("Publishing subject={:?} message={} topic={}", subject, message, topic_arn);

        let output = self.client
            .publish()
            .topic_arn(topic_arn)
            .set_subject(subject.map(str::to_string))
            .message(message)
            .send()
            .await?;

        tracing::debug!("Published to SNS, message id {:?}", output.message_id());
        Ok(output.message_id().map(str::to_string))
    }
}
