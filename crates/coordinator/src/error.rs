use std::time::Duration;

use thiserror::Error;

/// Errors returned by collaborator backends (issuer, recorder, notifier).
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend service rejected or failed the request.
    #[error("service error: {0}")]
    Service(String),

    /// The backend did not respond within the allowed duration.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The backend throttled the request.
    #[error("rate limited")]
    Throttled,

    /// The backend was given invalid configuration or credentials.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A value could not be encoded for the backend.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl BackendError {
    /// Returns `true` if the error is transient and the operation may succeed
    /// on retry. The coordinator itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Connection(_) | Self::Throttled
        )
    }
}

/// Errors raised while assembling a coordinator.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// A required component or setting was missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),
}
