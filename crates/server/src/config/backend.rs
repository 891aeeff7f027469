use std::fmt;

use dropgate_aws::AwsBaseConfig;
use serde::Deserialize;

/// Which collaborator implementations back the coordinator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process fakes; nothing leaves the server.
    #[default]
    Memory,
    /// S3, `DynamoDB` and SNS.
    Aws,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Aws => f.write_str("aws"),
        }
    }
}

/// Collaborator backend selection.
#[derive(Debug, Default, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,
    /// Create the record table on startup when pointed at a custom endpoint.
    #[serde(default)]
    pub create_table: bool,
}

/// AWS connection settings for the `aws` backend.
#[derive(Debug, Default, Deserialize)]
pub struct AwsServerConfig {
    #[serde(flatten)]
    pub base: AwsBaseConfig,
    /// Path-style S3 addressing, required by most local emulators.
    #[serde(default)]
    pub force_path_style: bool,
}
