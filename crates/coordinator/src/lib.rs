//! The upload coordination workflow.
//!
//! An [`UploadCoordinator`] turns one [`UploadRequest`](dropgate_core::UploadRequest)
//! into three sequential calls against external collaborators:
//!
//! 1. [`AuthorizationIssuer`] mints a signed, time-limited upload URL,
//! 2. [`MetadataRecorder`] writes one [`UploadRecord`](dropgate_core::UploadRecord),
//! 3. [`Notifier`] publishes the upload notification.
//!
//! Each step starts only after the previous one succeeded. A failure aborts
//! the remaining steps and nothing already done is rolled back.

pub mod builder;
pub mod collaborator;
pub mod config;
pub mod coordinator;
pub mod error;

pub use builder::UploadCoordinatorBuilder;
pub use collaborator::{AuthorizationIssuer, MetadataRecorder, Notifier, PublishReceipt};
pub use config::CoordinatorConfig;
pub use coordinator::{UploadCoordinator, UploadOutcome};
pub use error::{BackendError, CoordinatorError};
