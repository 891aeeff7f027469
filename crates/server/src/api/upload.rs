use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use serde::Serialize;

use dropgate_core::UploadError;

use super::AppState;
use crate::error::ServerError;

/// Success body: the presigned URL the client uploads to.
#[derive(Debug, Serialize)]
pub struct UploadUrlResponse {
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
}

/// `POST /upload-url` -- issue a presigned URL, record the upload and
/// notify subscribers.
///
/// The raw body is handed to the coordinator so that a malformed document
/// is reported through the configured error policy rather than as an
/// extractor rejection. A body that cannot be buffered, including one over
/// the size limit, is reported the same way.
pub async fn create_upload_url(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UploadUrlResponse>, ServerError> {
    let body = body.map_err(|rejection| {
        tracing::error!(error = %rejection, stage = "request", "unreadable request body");
        ServerError::upload(
            UploadError::InvalidRequest(rejection.body_text()),
            state.error_policy,
        )
    })?;

    let outcome = state
        .coordinator
        .handle_body(&body)
        .await
        .map_err(|e| ServerError::upload(e, state.error_policy))?;

    Ok(Json(UploadUrlResponse {
        upload_url: outcome.authorization.url,
    }))
}

/// `OPTIONS /upload-url` -- CORS preflight. Headers come from the router.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
