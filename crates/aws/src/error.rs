use std::time::Duration;

use dropgate_coordinator::BackendError;
use thiserror::Error;

/// Timeout reported when the SDK does not say how long it waited.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised by the AWS backends.
#[derive(Debug, Error)]
pub enum AwsProviderError {
    #[error("AWS service error: {0}")]
    ServiceError(String),

    #[error("AWS request throttled")]
    Throttled,

    #[error("AWS connection error: {0}")]
    Connection(String),

    #[error("AWS request timed out")]
    Timeout,

    #[error("credential error: {0}")]
    CredentialError(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl From<AwsProviderError> for BackendError {
    fn from(err: AwsProviderError) -> Self {
        match err {
            AwsProviderError::ServiceError(msg) => BackendError::Service(msg),
            AwsProviderError::Throttled => BackendError::Throttled,
            AwsProviderError::Connection(msg) => BackendError::Connection(msg),
            AwsProviderError::Timeout => BackendError::Timeout(DEFAULT_TIMEOUT),
            AwsProviderError::CredentialError(msg) | AwsProviderError::Configuration(msg) => {
                BackendError::Configuration(msg)
            }
        }
    }
}

/// Classify an SDK error message by the failure it describes.
///
/// Credential problems are checked first because the SDK reports them
/// through the same dispatch-failure path as network errors.
pub fn classify_sdk_error(error_str: &str) -> AwsProviderError {
    let lower = error_str.to_lowercase();
    if lower.contains("credential") || lower.contains("security token") {
        AwsProviderError::CredentialError(error_str.to_owned())
    } else if lower.contains("throttl")
        || lower.contains("rate exceed")
        || lower.contains("too many")
    {
        AwsProviderError::Throttled
    } else if lower.contains("timeout") || lower.contains("timed out") {
        AwsProviderError::Timeout
    } else if lower.contains("connection")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("network")
    {
        AwsProviderError::Connection(error_str.to_owned())
    } else {
        AwsProviderError::ServiceError(error_str.to_owned())
    }
}
