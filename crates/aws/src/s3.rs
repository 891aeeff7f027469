use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use dropgate_coordinator::{AuthorizationIssuer, BackendError};
use dropgate_core::UploadAuthorization;

use crate::auth::build_sdk_config;
use crate::config::AwsBaseConfig;
use crate::error::{AwsProviderError, classify_sdk_error};

/// Settings for [`S3Issuer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3IssuerConfig {
    /// Bucket that presigned uploads are written to.
    pub bucket: String,

    /// Address objects as `endpoint/bucket/key` instead of
    /// `bucket.endpoint/key`. Needed by most local S3 emulators.
    #[serde(default)]
    pub force_path_style: bool,
}

impl S3IssuerConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            force_path_style: false,
        }
    }

    #[must_use]
    pub fn with_force_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }
}

/// [`AuthorizationIssuer`] that presigns S3 `PutObject` requests.
///
/// Presigning is a local signing operation; no request reaches S3 until the
/// client uses the URL. The signature covers the bucket, the object key and
/// the `Content-Type` header.
pub struct S3Issuer {
    config: S3IssuerConfig,
    client: aws_sdk_s3::Client,
}

impl std::fmt::Debug for S3Issuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Issuer")
            .field("config", &self.config)
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3Issuer {
    /// Build an issuer with its own SDK configuration.
    pub async fn new(aws: &AwsBaseConfig, config: S3IssuerConfig) -> Self {
        let sdk_config = build_sdk_config(aws).await;
        Self::from_sdk_config(&sdk_config, config)
    }

    /// Build an issuer from an already-loaded SDK configuration.
    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig, config: S3IssuerConfig) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
            .force_path_style(config.force_path_style)
            .build();
        let client = aws_sdk_s3::Client::from_conf(s3_config);
        Self { config, client }
    }

    /// Create an issuer with a pre-built client (for testing).
    pub fn with_client(config: S3IssuerConfig, client: aws_sdk_s3::Client) -> Self {
        Self { config, client }
    }

    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }
}

#[async_trait]
impl AuthorizationIssuer for S3Issuer {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "aws-s3"
    }

    #[instrument(skip(self), fields(backend = "aws-s3", bucket = %self.config.bucket))]
    async fn issue(
        &self,
        object_key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<UploadAuthorization, BackendError> {
        let issued_at = Utc::now();
        let presigning = PresigningConfig::builder()
            .start_time(SystemTime::from(issued_at))
            .expires_in(ttl)
            .build()
            .map_err(|e| {
                BackendError::from(AwsProviderError::Configuration(format!(
                    "invalid presigning window: {e}"
                )))
            })?;

        debug!(ttl_secs = ttl.as_secs(), "presigning S3 PutObject");

        let presigned = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(object_key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| {
                let err_str = DisplayErrorContext(&e).to_string();
                error!(error = %err_str, "S3 presign failed");
                BackendError::from(classify_sdk_error(&err_str))
            })?;

        info!(object_key = %object_key, "S3 upload URL presigned");

        Ok(UploadAuthorization::new(
            presigned.uri(),
            object_key,
            content_type,
            issued_at,
            ttl,
        ))
    }

    #[instrument(skip(self), fields(backend = "aws-s3"))]
    async fn health_check(&self) -> Result<(), BackendError> {
        debug!(bucket = %self.config.bucket, "performing S3 health check");
        self.client
            .head_bucket()
            .bucket(&self.config.bucket)
            .send()
            .await
            .map_err(|e| {
                error!(error = %DisplayErrorContext(&e), "S3 health check failed");
                BackendError::Connection(format!("S3 health check failed: {e}"))
            })?;
        info!("S3 health check passed");
        Ok(())
    }
}
