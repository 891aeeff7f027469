use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use dropgate_coordinator::{AuthorizationIssuer, BackendError};
use dropgate_core::UploadAuthorization;

use crate::failure::FailureSwitch;

/// In-memory [`AuthorizationIssuer`] that mints `memory://` URLs.
///
/// Each URL embeds a random signature so two authorizations for the same
/// key are never equal. Every issued authorization is retained and can be
/// checked with [`MemoryIssuer::is_valid`].
#[derive(Debug)]
pub struct MemoryIssuer {
    bucket: String,
    issued: Mutex<Vec<UploadAuthorization>>,
    attempts: Mutex<u64>,
    failure: FailureSwitch,
}

impl MemoryIssuer {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            issued: Mutex::new(Vec::new()),
            attempts: Mutex::new(0),
            failure: FailureSwitch::default(),
        }
    }

    /// Make every subsequent `issue` call and health check fail with
    /// `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.failure.set(Some(message.into()));
    }

    /// Return to normal operation.
    pub fn recover(&self) {
        self.failure.set(None);
    }

    /// Authorizations issued so far, oldest first.
    pub fn issued(&self) -> Vec<UploadAuthorization> {
        self.issued
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of `issue` calls received, including failed ones.
    pub fn attempts(&self) -> u64 {
        *self
            .attempts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Whether `url` was issued by this backend and permits writing
    /// `object_key` with `content_type` at instant `at`.
    pub fn is_valid(
        &self,
        url: &str,
        object_key: &str,
        content_type: &str,
        at: DateTime<Utc>,
    ) -> bool {
        self.issued
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .any(|auth| auth.url == url && auth.permits(object_key, content_type, at))
    }
}

#[async_trait]
impl AuthorizationIssuer for MemoryIssuer {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "memory"
    }

    async fn issue(
        &self,
        object_key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<UploadAuthorization, BackendError> {
        *self
            .attempts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) += 1;
        self.failure.check()?;

        let issued_at = Utc::now();
        let placeholder = UploadAuthorization::new("", object_key, content_type, issued_at, ttl);
        let url = format!(
            "memory://{}/{}?content-type={}&expires={}&signature={}",
            self.bucket,
            object_key,
            content_type,
            placeholder.expires_at.timestamp(),
            Uuid::new_v4().simple()
        );
        let authorization = UploadAuthorization { url, ..placeholder };

        self.issued
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(authorization.clone());
        Ok(authorization)
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        self.failure.check()
    }
}
