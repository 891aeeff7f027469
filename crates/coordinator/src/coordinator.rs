use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info, instrument};

use dropgate_core::{
    NotificationEvent, UploadAuthorization, UploadError, UploadRecord, UploadRequest,
};

use crate::builder::UploadCoordinatorBuilder;
use crate::collaborator::{AuthorizationIssuer, MetadataRecorder, Notifier};
use crate::config::CoordinatorConfig;

/// Result of a request that completed every step.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    /// The authorization handed back to the client.
    pub authorization: UploadAuthorization,
    /// The record written to the record store.
    pub record: UploadRecord,
    /// Identifier the notifier assigned to the published message.
    pub message_id: String,
}

/// Coordinates URL issuance, metadata persistence and notification for one
/// upload request.
///
/// The coordinator holds only immutable configuration and collaborator
/// handles, so a single instance can serve any number of concurrent
/// requests behind an `Arc`.
pub struct UploadCoordinator {
    config: CoordinatorConfig,
    issuer: Arc<dyn AuthorizationIssuer>,
    recorder: Arc<dyn MetadataRecorder>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for UploadCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadCoordinator")
            .field("config", &self.config)
            .field("issuer", &self.issuer.name())
            .field("recorder", &self.recorder.name())
            .field("notifier", &self.notifier.name())
            .finish()
    }
}

impl UploadCoordinator {
    pub fn new(
        config: CoordinatorConfig,
        issuer: Arc<dyn AuthorizationIssuer>,
        recorder: Arc<dyn MetadataRecorder>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            issuer,
            recorder,
            notifier,
        }
    }

    pub fn builder() -> UploadCoordinatorBuilder {
        UploadCoordinatorBuilder::new()
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn issuer(&self) -> &dyn AuthorizationIssuer {
        self.issuer.as_ref()
    }

    pub fn recorder(&self) -> &dyn MetadataRecorder {
        self.recorder.as_ref()
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Parse a raw request body and run the workflow.
    ///
    /// A body that fails to parse or validate is rejected before any
    /// collaborator is called.
    pub async fn handle_body(&self, body: &[u8]) -> Result<UploadOutcome, UploadError> {
        let request = UploadRequest::parse(body).inspect_err(|e| {
            error!(error = %e, stage = "request", "rejected upload request");
        })?;
        self.handle(request).await
    }

    /// Run the workflow for an already-parsed request.
    ///
    /// Steps run strictly in order: issue, record, notify. The first failure
    /// is returned and later steps are skipped; effects of earlier steps
    /// remain in place.
    #[instrument(
        skip(self, request),
        fields(filename = %request.filename, content_type = %request.content_type)
    )]
    pub async fn handle(&self, request: UploadRequest) -> Result<UploadOutcome, UploadError> {
        match self.run(request).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                let stage = e.stage();
                error!(error = %e, stage = %stage, "upload request failed");
                Err(e)
            }
        }
    }

    async fn run(&self, request: UploadRequest) -> Result<UploadOutcome, UploadError> {
        request.validate()?;
        let UploadRequest {
            filename,
            content_type,
            email,
        } = request;

        debug!(
            issuer = self.issuer.name(),
            ttl_secs = self.config.url_ttl.as_secs(),
            "issuing upload authorization"
        );
        let authorization = self
            .issuer
            .issue(&filename, &content_type, self.config.url_ttl)
            .await
            .map_err(|e| UploadError::Authorization(e.to_string()))?;
        info!(
            object_key = %authorization.object_key,
            expires_at = %authorization.expires_at,
            "upload authorization issued"
        );

        let image_url = self.config.target.object_url(&filename);
        let record = UploadRecord::new(email.as_str(), image_url, Utc::now());
        self.recorder
            .put_record(&self.config.table_name, &record)
            .await
            .map_err(|e| UploadError::Persistence(e.to_string()))?;
        info!(
            record_id = %record.id,
            table = %self.config.table_name,
            image_url = %record.image_url,
            "upload record written"
        );

        let event = NotificationEvent::new(filename, email);
        let receipt = self
            .notifier
            .publish(&self.config.topic, &event.message())
            .await
            .map_err(|e| UploadError::Notification(e.to_string()))?;
        info!(
            message_id = %receipt.message_id,
            topic = %self.config.topic,
            "upload notification published"
        );

        Ok(UploadOutcome {
            authorization,
            record,
            message_id: receipt.message_id,
        })
    }
}
