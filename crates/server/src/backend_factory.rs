use std::sync::Arc;

use tracing::info;

use dropgate_coordinator::{AuthorizationIssuer, MetadataRecorder, Notifier, UploadCoordinator};
use dropgate_memory::{MemoryIssuer, MemoryNotifier, MemoryRecorder};

use crate::config::{BackendKind, DropgateConfig};
use crate::error::ServerError;

type Collaborators = (
    Arc<dyn AuthorizationIssuer>,
    Arc<dyn MetadataRecorder>,
    Arc<dyn Notifier>,
);

/// Assemble the upload coordinator for the configured backend.
pub async fn create_coordinator(config: &DropgateConfig) -> Result<UploadCoordinator, ServerError> {
    let (issuer, recorder, notifier) = match config.backend.kind {
        BackendKind::Memory => memory_collaborators(config),
        BackendKind::Aws => aws_collaborators(config).await?,
    };

    let coordinator = UploadCoordinator::builder()
        .config(config.coordinator_config())
        .issuer(issuer)
        .recorder(recorder)
        .notifier(notifier)
        .build()?;

    info!(
        backend = %config.backend.kind,
        bucket = %config.upload.bucket,
        table = %config.upload.table_name,
        "upload coordinator initialized"
    );
    Ok(coordinator)
}

fn memory_collaborators(config: &DropgateConfig) -> Collaborators {
    let issuer: Arc<dyn AuthorizationIssuer> = Arc::new(MemoryIssuer::new(&config.upload.bucket));
    let recorder: Arc<dyn MetadataRecorder> = Arc::new(MemoryRecorder::new());
    let notifier: Arc<dyn Notifier> = Arc::new(MemoryNotifier::new());
    (issuer, recorder, notifier)
}

#[cfg(feature = "aws")]
async fn aws_collaborators(config: &DropgateConfig) -> Result<Collaborators, ServerError> {
    use dropgate_aws::auth::build_sdk_config;
    use dropgate_aws::{DynamoRecorder, S3Issuer, S3IssuerConfig, SnsNotifier};

    let sdk_config = build_sdk_config(&config.aws.base).await;

    let issuer = S3Issuer::from_sdk_config(
        &sdk_config,
        S3IssuerConfig::new(&config.upload.bucket)
            .with_force_path_style(config.aws.force_path_style),
    );
    let recorder = DynamoRecorder::from_sdk_config(&sdk_config);
    let notifier = SnsNotifier::from_sdk_config(&sdk_config);

    // Table creation is limited to custom endpoints such as LocalStack.
    if config.backend.create_table && config.aws.base.is_local() {
        dropgate_aws::create_table(recorder.client(), &config.upload.table_name)
            .await
            .map_err(|e| ServerError::Config(format!("dynamodb table creation: {e}")))?;
    }

    let issuer: Arc<dyn AuthorizationIssuer> = Arc::new(issuer);
    let recorder: Arc<dyn MetadataRecorder> = Arc::new(recorder);
    let notifier: Arc<dyn Notifier> = Arc::new(notifier);
    Ok((issuer, recorder, notifier))
}

#[cfg(not(feature = "aws"))]
#[allow(clippy::unused_async)]
async fn aws_collaborators(_config: &DropgateConfig) -> Result<Collaborators, ServerError> {
    Err(ServerError::Config(
        "backend \"aws\" is unavailable (is the `aws` feature enabled?)".into(),
    ))
}
