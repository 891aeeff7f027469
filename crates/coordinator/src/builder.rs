use std::sync::Arc;

use crate::collaborator::{AuthorizationIssuer, MetadataRecorder, Notifier};
use crate::config::CoordinatorConfig;
use crate::coordinator::UploadCoordinator;
use crate::error::CoordinatorError;

/// Fluent builder for constructing an [`UploadCoordinator`].
///
/// A config and all three collaborators must be supplied.
#[derive(Default)]
pub struct UploadCoordinatorBuilder {
    config: Option<CoordinatorConfig>,
    issuer: Option<Arc<dyn AuthorizationIssuer>>,
    recorder: Option<Arc<dyn MetadataRecorder>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl UploadCoordinatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deployment configuration (bucket, table, topic, TTL).
    #[must_use]
    pub fn config(mut self, config: CoordinatorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the authorization issuer.
    #[must_use]
    pub fn issuer(mut self, issuer: Arc<dyn AuthorizationIssuer>) -> Self {
        self.issuer = Some(issuer);
        self
    }

    /// Set the metadata recorder.
    #[must_use]
    pub fn recorder(mut self, recorder: Arc<dyn MetadataRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Set the notifier.
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Consume the builder and produce a configured [`UploadCoordinator`].
    ///
    /// Returns [`CoordinatorError::Configuration`] if a component is missing
    /// or the config fails validation.
    pub fn build(self) -> Result<UploadCoordinator, CoordinatorError> {
        let config = self
            .config
            .ok_or_else(|| CoordinatorError::Configuration("config is required".into()))?;
        config.validate()?;

        let issuer = self.issuer.ok_or_else(|| {
            CoordinatorError::Configuration("authorization issuer is required".into())
        })?;
        let recorder = self.recorder.ok_or_else(|| {
            CoordinatorError::Configuration("metadata recorder is required".into())
        })?;
        let notifier = self
            .notifier
            .ok_or_else(|| CoordinatorError::Configuration("notifier is required".into()))?;

        Ok(UploadCoordinator::new(config, issuer, recorder, notifier))
    }
}
