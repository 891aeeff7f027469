use serde::{Deserialize, Serialize};

/// Default upper bound on a single SDK operation.
pub const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 10;

/// Connection settings shared by every AWS backend.
///
/// Holds the region, an optional endpoint override for local stacks such as
/// `LocalStack`, a per-operation timeout, and optional STS assume-role
/// credentials.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsBaseConfig {
    /// AWS region (e.g. `"us-east-1"`).
    pub region: String,

    /// IAM role ARN to assume via STS.
    pub role_arn: Option<String>,

    /// Endpoint URL override applied to every service client.
    pub endpoint_url: Option<String>,

    /// STS session name; `"dropgate"` when unset.
    pub session_name: Option<String>,

    /// External ID required by the role's trust policy.
    pub external_id: Option<String>,

    /// Upper bound on a single SDK operation, retries included.
    pub operation_timeout_seconds: u64,
}

impl std::fmt::Debug for AwsBaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsBaseConfig")
            .field("region", &self.region)
            .field("role_arn", &self.role_arn.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint_url", &self.endpoint_url)
            .field("session_name", &self.session_name)
            .field("external_id", &self.external_id.as_ref().map(|_| "[REDACTED]"))
            .field("operation_timeout_seconds", &self.operation_timeout_seconds)
            .finish()
    }
}

impl AwsBaseConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.role_arn = Some(role_arn.into());
        self
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    #[must_use]
    pub fn with_operation_timeout(mut self, seconds: u64) -> Self {
        self.operation_timeout_seconds = seconds;
        self
    }

    /// The session name used when assuming `role_arn`.
    pub fn session_name(&self) -> &str {
        self.session_name.as_deref().unwrap_or("dropgate")
    }

    /// Whether requests go to a custom endpoint instead of AWS.
    pub fn is_local(&self) -> bool {
        self.endpoint_url.is_some()
    }
}

impl Default for AwsBaseConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_owned(),
            role_arn: None,
            endpoint_url: None,
            session_name: None,
            external_id: None,
            operation_timeout_seconds: DEFAULT_OPERATION_TIMEOUT_SECS,
        }
    }
}
