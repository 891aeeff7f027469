use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A signed, time-limited authorization to write one object.
///
/// The `url` is opaque to the coordinator: the client issues a `PUT` against
/// it with a `Content-Type` equal to `content_type` before `expires_at`.
/// Authorizations are returned to the caller and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadAuthorization {
    /// Signed upload destination.
    pub url: String,

    /// The only object key this authorization permits writing.
    pub object_key: String,

    /// The content type the upload must declare.
    pub content_type: String,

    /// When the authorization was minted.
    pub issued_at: DateTime<Utc>,

    /// Instant after which the authorization is no longer accepted.
    pub expires_at: DateTime<Utc>,
}

impl UploadAuthorization {
    /// Build an authorization valid for `ttl` starting at `issued_at`.
    pub fn new(
        url: impl Into<String>,
        object_key: impl Into<String>,
        content_type: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        Self {
            url: url.into(),
            object_key: object_key.into(),
            content_type: content_type.into(),
            issued_at,
            expires_at: issued_at.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Length of the validity window.
    pub fn validity(&self) -> chrono::Duration {
        self.expires_at - self.issued_at
    }

    /// Whether the authorization has expired at `at`.
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        at >= self.expires_at
    }

    /// Whether this authorization permits writing `object_key` with
    /// `content_type` at instant `at`.
    pub fn permits(&self, object_key: &str, content_type: &str, at: DateTime<Utc>) -> bool {
        self.object_key == object_key
            && self.content_type == content_type
            && at >= self.issued_at
            && !self.is_expired_at(at)
    }
}
