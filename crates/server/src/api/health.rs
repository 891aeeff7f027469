use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub issuer: String,
    pub recorder: String,
    pub notifier: String,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    /// Collaborator role to `"ok"` or the failure message.
    pub checks: BTreeMap<&'static str, String>,
}

/// `GET /health` -- liveness plus the collaborator backends in use.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let coordinator = &state.coordinator;
    let body = HealthResponse {
        status: "ok",
        issuer: coordinator.issuer().name().to_owned(),
        recorder: coordinator.recorder().name().to_owned(),
        notifier: coordinator.notifier().name().to_owned(),
    };
    (StatusCode::OK, Json(body))
}

/// `GET /ready` -- run every collaborator's health check concurrently.
///
/// Returns 503 when any check fails.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let coordinator = &state.coordinator;
    let (issuer, recorder, notifier) = tokio::join!(
        coordinator.issuer().health_check(),
        coordinator.recorder().health_check(),
        coordinator.notifier().health_check(),
    );

    let mut healthy = true;
    let mut checks = BTreeMap::new();
    for (role, result) in [("issuer", issuer), ("recorder", recorder), ("notifier", notifier)] {
        let outcome = match result {
            Ok(()) => "ok".to_owned(),
            Err(e) => {
                tracing::warn!(role, error = %e, "readiness check failed");
                healthy = false;
                e.to_string()
            }
        };
        checks.insert(role, outcome);
    }

    let (status, label) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    (status, Json(ReadyResponse { status: label, checks }))
}
