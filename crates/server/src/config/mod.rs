mod backend;
mod errors;
mod server;
mod telemetry;
mod upload;

#[cfg(test)]
mod tests;

pub use backend::*;
pub use errors::*;
pub use server::*;
pub use telemetry::*;
pub use upload::*;

use std::time::Duration;

use dropgate_coordinator::{CoordinatorConfig, CoordinatorError};
use serde::Deserialize;

/// Top-level configuration for the Dropgate server, loaded from a TOML file.
///
/// Every section is optional; an empty document yields a memory-backed
/// server on `127.0.0.1:8080`.
#[derive(Debug, Default, Deserialize)]
pub struct DropgateConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Bucket, table and topic identifiers.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Collaborator backend selection.
    #[serde(default)]
    pub backend: BackendConfig,
    /// AWS connection settings, used by the `aws` backend.
    #[serde(default)]
    pub aws: AwsServerConfig,
    /// Error reporting policy.
    #[serde(default)]
    pub errors: ErrorsConfig,
    /// OpenTelemetry distributed tracing configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl DropgateConfig {
    /// Coordinator settings derived from the `[upload]` section.
    pub fn coordinator_config(&self) -> CoordinatorConfig {
        let upload = &self.upload;
        let config = CoordinatorConfig::new(&upload.bucket, &upload.table_name, &upload.topic_arn)
            .with_url_ttl(Duration::from_secs(upload.url_ttl_seconds));
        match &upload.public_base_url {
            Some(base) => config.with_public_base_url(base),
            None => config,
        }
    }

    /// Check every setting that can be checked without contacting a backend.
    pub fn validate(&self) -> Result<(), CoordinatorError> {
        self.coordinator_config().validate()?;
        if self.backend.kind == BackendKind::Aws && self.aws.base.region.trim().is_empty() {
            return Err(CoordinatorError::Configuration(
                "[aws] region must not be empty".into(),
            ));
        }
        if self.aws.base.operation_timeout_seconds == 0 {
            return Err(CoordinatorError::Configuration(
                "[aws] operation_timeout_seconds must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.telemetry.sample_ratio) {
            return Err(CoordinatorError::Configuration(format!(
                "[telemetry] sample_ratio must be between 0.0 and 1.0, got {}",
                self.telemetry.sample_ratio
            )));
        }
        Ok(())
    }
}
