use serde::Deserialize;

/// How upload failures are reported to HTTP clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Every failure is a 500 carrying the raw error text.
    #[default]
    Compat,
    /// Input errors are 400 with their message. Infrastructure failures are
    /// 500 with a generic message; details are only logged.
    Hardened,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorsConfig {
    #[serde(default)]
    pub policy: ErrorPolicy,
}
