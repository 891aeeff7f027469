//! W3C Trace Context propagation for incoming requests.
//!
//! A caller that sends `traceparent` gets the server's request span
//! attached to its own trace. Only effective when telemetry registered the
//! W3C propagator; otherwise the global no-op propagator extracts nothing.

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use opentelemetry::propagation::Extractor;
use opentelemetry::{global, trace::TraceContextExt};
use tracing_opentelemetry::OpenTelemetrySpanExt;

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(axum::http::HeaderName::as_str).collect()
    }
}

fn extract_parent(headers: &HeaderMap) -> opentelemetry::Context {
    global::get_text_map_propagator(|p| p.extract(&HeaderExtractor(headers)))
}

/// Axum middleware that parents the current span on the caller's trace.
pub async fn propagate_trace_context(request: Request, next: Next) -> Response {
    let parent_cx = extract_parent(request.headers());
    if parent_cx.span().span_context().is_remote() {
        tracing::Span::current().set_parent(parent_cx);
    }
    next.run(request).await
}
