use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use dropgate_core::{UploadAuthorization, UploadRecord};

use crate::error::BackendError;

/// Mints signed, time-limited authorizations to write one object.
///
/// Implementations must be `Send + Sync` to be shared across async tasks.
#[async_trait]
pub trait AuthorizationIssuer: Send + Sync {
    /// Returns the name of this backend, used in logs and health output.
    fn name(&self) -> &str;

    /// Issue an authorization that permits writing exactly `object_key`
    /// with `content_type`, valid for no longer than `ttl`.
    async fn issue(
        &self,
        object_key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<UploadAuthorization, BackendError>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Durably stores upload records with atomic single-item writes.
#[async_trait]
pub trait MetadataRecorder: Send + Sync {
    fn name(&self) -> &str;

    /// Write `record` to `table` as one new item.
    async fn put_record(&self, table: &str, record: &UploadRecord) -> Result<(), BackendError>;

    async fn health_check(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Acknowledgement returned by a [`Notifier`] after a publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Backend-assigned message identifier.
    pub message_id: String,
}

impl PublishReceipt {
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
        }
    }
}

/// Publishes best-effort messages to subscribers of a named topic.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    /// Publish `message` to `topic`. Delivery guarantees are those of the
    /// backend (typically at-least-once).
    async fn publish(&self, topic: &str, message: &str) -> Result<PublishReceipt, BackendError>;

    async fn health_check(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
