use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_config::{ConfigLoader, Region};
use tracing::{debug, info};

use crate::config::AwsBaseConfig;

fn loader(config: &AwsBaseConfig) -> ConfigLoader {
    let mut loader = aws_config::from_env().region(Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    loader.timeout_config(
        TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(config.operation_timeout_seconds))
            .build(),
    )
}

/// Build the shared SDK configuration for every Dropgate AWS client.
///
/// Credentials come from the standard environment chain. When `role_arn` is
/// set they are exchanged through STS for auto-refreshing role credentials.
///
/// ```no_run
/// use dropgate_aws::auth::build_sdk_config;
/// use dropgate_aws::config::AwsBaseConfig;
///
/// # async fn example() {
/// let config = AwsBaseConfig::new("us-east-1").with_endpoint_url("http://localhost:4566");
/// let sdk_config = build_sdk_config(&config).await;
/// # }
/// ```
pub async fn build_sdk_config(config: &AwsBaseConfig) -> aws_config::SdkConfig {
    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom AWS endpoint");
    }

    let Some(role_arn) = &config.role_arn else {
        return loader(config).load().await;
    };

    let session_name = config.session_name();
    info!(session_name = %session_name, "assuming IAM role via STS");

    // STS calls use the base credentials and endpoint override.
    let base_config = loader(config).load().await;

    let mut provider = aws_config::sts::AssumeRoleProvider::builder(role_arn)
        .session_name(session_name)
        .region(Region::new(config.region.clone()));
    if let Some(external_id) = &config.external_id {
        provider = provider.external_id(external_id);
    }
    let provider = provider.configure(&base_config).build().await;

    loader(config).credentials_provider(provider).load().await
}
