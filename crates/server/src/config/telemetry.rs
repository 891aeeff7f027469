use std::collections::HashMap;

use serde::Deserialize;

/// OpenTelemetry export settings.
///
/// When enabled, spans for each HTTP request and every upload step are
/// exported via OTLP to a collector such as Jaeger or Grafana Tempo.
///
/// ```toml
/// [telemetry]
/// enabled = true
/// endpoint = "http://localhost:4317"
/// protocol = "grpc"
/// ```
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    /// OTLP collector endpoint.
    pub endpoint: String,
    /// `service.name` resource attribute.
    pub service_name: String,
    /// Fraction of traces sampled, `0.0..=1.0`.
    pub sample_ratio: f64,
    /// `"grpc"` or `"http"`.
    pub protocol: String,
    /// Exporter timeout in seconds.
    pub timeout_seconds: u64,
    /// Extra resource attributes.
    pub resource_attributes: HashMap<String, String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "http://localhost:4317".to_owned(),
            service_name: "dropgate".to_owned(),
            sample_ratio: 1.0,
            protocol: "grpc".to_owned(),
            timeout_seconds: 10,
            resource_attributes: HashMap::new(),
        }
    }
}
