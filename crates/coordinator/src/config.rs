use std::time::Duration;

use dropgate_core::StorageTarget;

use crate::error::CoordinatorError;

/// Default validity window of issued upload authorizations.
pub const DEFAULT_URL_TTL: Duration = Duration::from_secs(60);

/// Longest validity window S3 accepts for a presigned request (7 days).
pub const MAX_URL_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Deployment identifiers the coordinator is bound to at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Bucket uploads are written to.
    pub target: StorageTarget,

    /// Record store table receiving one item per accepted request.
    pub table_name: String,

    /// Topic the upload notification is published to.
    pub topic: String,

    /// Validity window passed to the issuer for every authorization.
    pub url_ttl: Duration,
}

impl CoordinatorConfig {
    /// Create a config with the default 60 second URL validity window.
    pub fn new(
        bucket: impl Into<String>,
        table_name: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            target: StorageTarget::new(bucket),
            table_name: table_name.into(),
            topic: topic.into(),
            url_ttl: DEFAULT_URL_TTL,
        }
    }

    /// Override the validity window of issued authorizations.
    #[must_use]
    pub fn with_url_ttl(mut self, ttl: Duration) -> Self {
        self.url_ttl = ttl;
        self
    }

    /// Address objects through `base_url` instead of the S3 bucket host.
    #[must_use]
    pub fn with_public_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.target = self.target.with_public_base_url(base_url);
        self
    }

    /// Reject empty identifiers and out-of-range TTLs.
    pub fn validate(&self) -> Result<(), CoordinatorError> {
        let fields = [
            ("bucket", &self.target.bucket),
            ("table_name", &self.table_name),
            ("topic", &self.topic),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(CoordinatorError::Configuration(format!(
                    "{name} must not be empty"
                )));
            }
        }
        if self.url_ttl.is_zero() || self.url_ttl > MAX_URL_TTL {
            return Err(CoordinatorError::Configuration(format!(
                "url_ttl must be between 1s and {}s, got {}s",
                MAX_URL_TTL.as_secs(),
                self.url_ttl.as_secs()
            )));
        }
        Ok(())
    }
}
