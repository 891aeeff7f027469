use std::sync::Arc;

use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use tower::ServiceExt;

use dropgate_coordinator::{CoordinatorConfig, UploadCoordinator};
use dropgate_memory::{MemoryIssuer, MemoryNotifier, MemoryRecorder};
use dropgate_server::api::AppState;
use dropgate_server::config::ErrorPolicy;
use dropgate_server::error::GENERIC_FAILURE;

const BUCKET: &str = "cc-aws-workshop2-images";
const TABLE: &str = "ImageUploads";
const TOPIC: &str = "arn:aws:sns:us-east-1:000000000000:ImageUploadNotifications";
const CAT: &str = r#"{"filename":"cat.png","contentType":"image/png","email":"a@b.com"}"#;

// -- Helpers --------------------------------------------------------------

struct TestApp {
    recorder: Arc<MemoryRecorder>,
    notifier: Arc<MemoryNotifier>,
    issuer: Arc<MemoryIssuer>,
    app: axum::Router,
}

fn build_app(policy: ErrorPolicy) -> TestApp {
    let issuer = Arc::new(MemoryIssuer::new(BUCKET));
    let recorder = Arc::new(MemoryRecorder::new());
    let notifier = Arc::new(MemoryNotifier::new());

    let coordinator = UploadCoordinator::builder()
        .config(CoordinatorConfig::new(BUCKET, TABLE, TOPIC))
        .issuer(issuer.clone())
        .recorder(recorder.clone())
        .notifier(notifier.clone())
        .build()
        .expect("coordinator should build");

    TestApp {
        recorder,
        notifier,
        issuer,
        app: dropgate_server::api::router(AppState::new(Arc::new(coordinator), policy)),
    }
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(http::Method::POST)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn assert_cors(response: &axum::response::Response) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

// -- Tests ----------------------------------------------------------------

#[tokio::test]
async fn upload_url_returns_presigned_url() {
    let t = build_app(ErrorPolicy::Compat);

    let response = t.app.oneshot(post("/upload-url", CAT)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    let json = json_body(response).await;
    let url = json["uploadURL"].as_str().unwrap();
    assert!(url.starts_with("memory://cc-aws-workshop2-images/cat.png?"));
    assert_eq!(json.as_object().unwrap().len(), 1);

    let records = t.recorder.records(TABLE);
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].image_url,
        "https://cc-aws-workshop2-images.s3.amazonaws.com/cat.png"
    );
    assert_eq!(
        t.notifier.messages_for(TOPIC),
        vec!["A new file named cat.png was uploaded by a@b.com."]
    );
}

#[tokio::test]
async fn root_path_serves_the_same_workflow() {
    let t = build_app(ErrorPolicy::Compat);

    let response = t.app.oneshot(post("/", CAT)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(t.recorder.len(), 1);
}

#[tokio::test]
async fn malformed_body_is_500_under_compat() {
    let t = build_app(ErrorPolicy::Compat);

    let response = t
        .app
        .oneshot(post("/upload-url", "{filename: cat.png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    let json = json_body(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("invalid request"));
    assert_eq!(t.issuer.attempts(), 0);
    assert!(t.recorder.is_empty());
}

#[tokio::test]
async fn malformed_body_is_400_under_hardened() {
    let t = build_app(ErrorPolicy::Hardened);

    let body = r#"{"filename":"cat.png","email":"a@b.com"}"#;
    let response = t.app.oneshot(post("/upload-url", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors(&response);
    let json = json_body(response).await;
    assert!(json["error"].as_str().unwrap().contains("contentType"));
}

fn oversized_body() -> String {
    // Above axum's default 2 MiB body limit.
    let padding = "x".repeat(3 * 1024 * 1024);
    let fields = r#""filename":"cat.png","contentType":"image/png","email":"a@b.com""#;
    format!(r#"{{{fields},"pad":"{padding}"}}"#)
}

#[tokio::test]
async fn oversized_body_is_500_with_error_under_compat() {
    let t = build_app(ErrorPolicy::Compat);

    let response = t
        .app
        .oneshot(post("/upload-url", &oversized_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    let json = json_body(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("invalid request"));
    assert_eq!(t.issuer.attempts(), 0);
    assert!(t.recorder.is_empty());
}

#[tokio::test]
async fn oversized_body_is_400_under_hardened() {
    let t = build_app(ErrorPolicy::Hardened);

    let response = t
        .app
        .oneshot(post("/upload-url", &oversized_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["error"].as_str().unwrap().contains("length limit"));
    assert!(t.notifier.published().is_empty());
}

#[tokio::test]
async fn notifier_failure_reports_raw_text_under_compat() {
    let t = build_app(ErrorPolicy::Compat);
    t.notifier.fail_with("topic unavailable");

    let response = t.app.oneshot(post("/upload-url", CAT)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(
        json["error"],
        "notification failed: service error: topic unavailable"
    );
    // The record written before the failing step stays in place.
    assert_eq!(t.recorder.records(TABLE).len(), 1);
}

#[tokio::test]
async fn recorder_failure_is_generic_under_hardened() {
    let t = build_app(ErrorPolicy::Hardened);
    t.recorder.fail_with("AccessDeniedException: not authorized");

    let response = t.app.oneshot(post("/upload-url", CAT)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    let json = json_body(response).await;
    assert_eq!(json["error"], GENERIC_FAILURE);
    assert!(t.notifier.published().is_empty());
}

#[tokio::test]
async fn preflight_returns_204_with_cors_headers() {
    let t = build_app(ErrorPolicy::Compat);

    let response = t
        .app
        .oneshot(
            Request::builder()
                .method(http::Method::OPTIONS)
                .uri("/upload-url")
                .header("origin", "https://example.com")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_cors(&response);
    assert_eq!(t.issuer.attempts(), 0);
}

#[tokio::test]
async fn repeated_posts_produce_distinct_urls_and_records() {
    let t = build_app(ErrorPolicy::Compat);

    let first = json_body(t.app.clone().oneshot(post("/upload-url", CAT)).await.unwrap()).await;
    let second = json_body(t.app.oneshot(post("/upload-url", CAT)).await.unwrap()).await;

    assert_ne!(first["uploadURL"], second["uploadURL"]);
    assert_eq!(t.recorder.records(TABLE).len(), 2);
    assert_eq!(t.notifier.published().len(), 2);
}

#[tokio::test]
async fn health_reports_backends() {
    let t = build_app(ErrorPolicy::Compat);

    let response = t
        .app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["issuer"], "memory");
    assert_eq!(json["recorder"], "memory");
    assert_eq!(json["notifier"], "memory");
}

#[tokio::test]
async fn ready_runs_collaborator_checks() {
    let t = build_app(ErrorPolicy::Compat);

    let response = t
        .app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["checks"]["issuer"], "ok");
    assert_eq!(json["checks"]["recorder"], "ok");
    assert_eq!(json["checks"]["notifier"], "ok");
}

#[tokio::test]
async fn ready_is_503_when_a_collaborator_is_down() {
    let t = build_app(ErrorPolicy::Compat);
    t.recorder.fail_with("table ImageUploads not found");

    let response = t
        .app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_cors(&response);
    let json = json_body(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["issuer"], "ok");
    assert_eq!(
        json["checks"]["recorder"],
        "service error: table ImageUploads not found"
    );
    assert_eq!(json["checks"]["notifier"], "ok");
}
