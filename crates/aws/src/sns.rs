use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use tracing::{debug, error, info, instrument};

use dropgate_coordinator::{BackendError, Notifier, PublishReceipt};

use crate::auth::build_sdk_config;
use crate::config::AwsBaseConfig;
use crate::error::classify_sdk_error;

/// [`Notifier`] that publishes plain-text messages to SNS topics.
pub struct SnsNotifier {
    client: aws_sdk_sns::Client,
}

impl std::fmt::Debug for SnsNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnsNotifier")
            .field("client", &"<SnsClient>")
            .finish()
    }
}

impl SnsNotifier {
    pub async fn new(aws: &AwsBaseConfig) -> Self {
        let sdk_config = build_sdk_config(aws).await;
        Self::from_sdk_config(&sdk_config)
    }

    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_sns::Client::new(sdk_config),
        }
    }

    /// Create a notifier with a pre-built client (for testing).
    pub fn with_client(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "aws-sns"
    }

    #[instrument(skip(self, message), fields(backend = "aws-sns"))]
    async fn publish(&self, topic: &str, message: &str) -> Result<PublishReceipt, BackendError> {
        debug!(topic_arn = %topic, "publishing to SNS topic");

        let result = self
            .client
            .publish()
            .topic_arn(topic)
            .message(message)
            .send()
            .await
            .map_err(|e| {
                let err_str = DisplayErrorContext(&e).to_string();
                error!(error = %err_str, "SNS publish failed");
                BackendError::from(classify_sdk_error(&err_str))
            })?;

        let message_id = result.message_id().unwrap_or("unknown").to_owned();
        info!(message_id = %message_id, topic_arn = %topic, "SNS message published");
        Ok(PublishReceipt::new(message_id))
    }

    #[instrument(skip(self), fields(backend = "aws-sns"))]
    async fn health_check(&self) -> Result<(), BackendError> {
        debug!("performing SNS health check");
        self.client.list_topics().send().await.map_err(|e| {
            error!(error = %DisplayErrorContext(&e), "SNS health check failed");
            BackendError::Connection(format!("SNS health check failed: {e}"))
        })?;
        info!("SNS health check passed");
        Ok(())
    }
}
