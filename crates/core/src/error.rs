use std::fmt;

use thiserror::Error;

/// The workflow step an [`UploadError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    /// Parsing and structural validation of the request body.
    Request,
    /// Minting the signed upload authorization.
    Authorization,
    /// Writing the upload record.
    Persistence,
    /// Publishing the notification event.
    Notification,
}

impl UploadStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Authorization => "authorization",
            Self::Persistence => "persistence",
            Self::Notification => "notification",
        }
    }
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort an upload request.
///
/// Each variant corresponds to one step of the workflow. Steps completed
/// before the failing one are not undone.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The request body was malformed or missing a required field.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The storage backend refused to issue an upload authorization.
    #[error("authorization failed: {0}")]
    Authorization(String),

    /// The upload record could not be written.
    #[error("persistence failed: {0}")]
    Persistence(String),

    /// The upload notification could not be published.
    #[error("notification failed: {0}")]
    Notification(String),
}

impl UploadError {
    /// The workflow step that produced this error.
    pub fn stage(&self) -> UploadStage {
        match self {
            Self::InvalidRequest(_) => UploadStage::Request,
            Self::Authorization(_) => UploadStage::Authorization,
            Self::Persistence(_) => UploadStage::Persistence,
            Self::Notification(_) => UploadStage::Notification,
        }
    }

    /// Whether the caller (rather than an upstream service) is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

impl From<serde_json::Error> for UploadError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}
