use super::*;

#[test]
fn empty_document_uses_defaults() {
    let config: DropgateConfig = toml::from_str("").unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.shutdown_timeout_seconds, 30);
    assert_eq!(config.upload.bucket, "cc-aws-workshop2-images");
    assert_eq!(config.upload.table_name, "ImageUploads");
    assert_eq!(config.upload.url_ttl_seconds, 60);
    assert!(config.upload.public_base_url.is_none());
    assert_eq!(config.backend.kind, BackendKind::Memory);
    assert!(!config.backend.create_table);
    assert_eq!(config.aws.base.region, "us-east-1");
    assert_eq!(config.aws.base.operation_timeout_seconds, 10);
    assert_eq!(config.errors.policy, ErrorPolicy::Compat);
    assert!(!config.telemetry.enabled);
    assert!(config.validate().is_ok());
}

#[test]
fn full_document_is_parsed() {
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 3000

        [upload]
        bucket = "photos"
        table_name = "PhotoUploads"
        topic_arn = "arn:aws:sns:eu-west-1:111111111111:PhotoUploads"
        url_ttl_seconds = 300
        public_base_url = "https://cdn.example.com"

        [backend]
        kind = "aws"
        create_table = true

        [aws]
        region = "eu-west-1"
        endpoint_url = "http://localhost:4566"
        operation_timeout_seconds = 5
        force_path_style = true

        [errors]
        policy = "hardened"
    "#;

    let config: DropgateConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.backend.kind, BackendKind::Aws);
    assert!(config.backend.create_table);
    assert_eq!(config.aws.base.region, "eu-west-1");
    assert_eq!(
        config.aws.base.endpoint_url.as_deref(),
        Some("http://localhost:4566")
    );
    assert_eq!(config.aws.base.operation_timeout_seconds, 5);
    assert!(config.aws.force_path_style);
    assert_eq!(config.errors.policy, ErrorPolicy::Hardened);

    let coordinator = config.coordinator_config();
    assert_eq!(coordinator.target.bucket, "photos");
    assert_eq!(coordinator.table_name, "PhotoUploads");
    assert_eq!(coordinator.url_ttl, std::time::Duration::from_secs(300));
    assert_eq!(
        coordinator.target.object_url("cat.png"),
        "https://cdn.example.com/cat.png"
    );
}

#[test]
fn unknown_backend_kind_is_rejected() {
    let result: Result<DropgateConfig, _> = toml::from_str(
        r#"
        [backend]
        kind = "gcs"
    "#,
    );
    assert!(result.is_err());
}

#[test]
fn unknown_error_policy_is_rejected() {
    let result: Result<ErrorsConfig, _> = toml::from_str(r#"policy = "strict""#);
    assert!(result.is_err());
}

#[test]
fn zero_ttl_fails_validation() {
    let config: DropgateConfig = toml::from_str(
        r"
        [upload]
        url_ttl_seconds = 0
    ",
    )
    .unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("url_ttl"));
}

#[test]
fn ttl_beyond_a_week_fails_validation() {
    let config: DropgateConfig = toml::from_str(
        r"
        [upload]
        url_ttl_seconds = 604801
    ",
    )
    .unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn empty_topic_fails_validation() {
    let config: DropgateConfig = toml::from_str(
        r#"
        [upload]
        topic_arn = ""
    "#,
    )
    .unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("topic"));
}

#[test]
fn zero_operation_timeout_fails_validation() {
    let config: DropgateConfig = toml::from_str(
        r"
        [aws]
        operation_timeout_seconds = 0
    ",
    )
    .unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("operation_timeout_seconds"));
}

#[test]
fn out_of_range_sample_ratio_fails_validation() {
    let config: DropgateConfig = toml::from_str(
        r"
        [telemetry]
        sample_ratio = 1.5
    ",
    )
    .unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("sample_ratio"));
}

#[test]
fn debug_output_redacts_role_arn() {
    let config: DropgateConfig = toml::from_str(
        r#"
        [aws]
        role_arn = "arn:aws:iam::123456789012:role/uploader"
    "#,
    )
    .unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("123456789012"));
    assert!(debug.contains("[REDACTED]"));
}

#[test]
fn telemetry_defaults() {
    let config: TelemetryConfig = toml::from_str("").unwrap();
    assert!(!config.enabled);
    assert_eq!(config.endpoint, "http://localhost:4317");
    assert_eq!(config.service_name, "dropgate");
    assert!((config.sample_ratio - 1.0).abs() < f64::EPSILON);
    assert_eq!(config.protocol, "grpc");
    assert_eq!(config.timeout_seconds, 10);
    assert!(config.resource_attributes.is_empty());
}

#[test]
fn telemetry_custom_config() {
    let toml = r#"
        enabled = true
        endpoint = "http://collector:4318"
        service_name = "uploads-edge"
        sample_ratio = 0.25
        protocol = "http"

        [resource_attributes]
        "deployment.environment" = "staging"
    "#;

    let config: TelemetryConfig = toml::from_str(toml).unwrap();
    assert!(config.enabled);
    assert_eq!(config.endpoint, "http://collector:4318");
    assert_eq!(config.service_name, "uploads-edge");
    assert!((config.sample_ratio - 0.25).abs() < f64::EPSILON);
    assert_eq!(config.protocol, "http");
    assert_eq!(
        config
            .resource_attributes
            .get("deployment.environment")
            .map(String::as_str),
        Some("staging")
    );
}
