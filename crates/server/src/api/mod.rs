pub mod health;
pub mod trace_context;
pub mod upload;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::middleware;
use axum::routing::{get, post};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use dropgate_coordinator::UploadCoordinator;

use crate::config::ErrorPolicy;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The coordinator serving every upload request.
    pub coordinator: Arc<UploadCoordinator>,
    /// How upload failures are rendered.
    pub error_policy: ErrorPolicy,
}

impl AppState {
    pub fn new(coordinator: Arc<UploadCoordinator>, error_policy: ErrorPolicy) -> Self {
        Self {
            coordinator,
            error_policy,
        }
    }
}

/// Build the Axum router.
///
/// The CORS headers are attached to every response, including errors and
/// preflight replies, so browsers can read failures as well as successes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route(
            "/upload-url",
            post(upload::create_upload_url).options(upload::preflight),
        )
        .route(
            "/",
            post(upload::create_upload_url).options(upload::preflight),
        )
        .with_state(state)
        .layer(middleware::from_fn(trace_context::propagate_trace_context))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}
