use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use dropgate_coordinator::CoordinatorError;
use dropgate_core::UploadError;

use crate::config::ErrorPolicy;

/// Body returned for infrastructure failures under [`ErrorPolicy::Hardened`].
pub const GENERIC_FAILURE: &str = "upload could not be processed";

/// Errors that can occur when running the Dropgate server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The coordinator could not be assembled.
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),

    /// An upload request failed; rendered according to `policy`.
    #[error("{source}")]
    Upload {
        source: UploadError,
        policy: ErrorPolicy,
    },
}

impl ServerError {
    pub fn upload(source: UploadError, policy: ErrorPolicy) -> Self {
        Self::Upload { source, policy }
    }

    /// Status code and client-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Upload {
                source,
                policy: ErrorPolicy::Compat,
            } => (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()),
            Self::Upload {
                source,
                policy: ErrorPolicy::Hardened,
            } => {
                if source.is_client_error() {
                    (StatusCode::BAD_REQUEST, source.to_string())
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_owned())
                }
            }
            Self::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::Coordinator(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
