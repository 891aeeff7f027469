use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Durable record of one accepted upload request.
///
/// A record asserts only that an authorization was issued, never that the
/// upload completed. Repeated requests for the same filename each produce
/// their own record, distinguished by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    /// Unique record identifier (UUIDv7, time-ordered).
    pub id: Uuid,

    /// Identifier of the user who requested the upload.
    pub email: String,

    /// Address the object will occupy once uploaded.
    pub image_url: String,

    /// When the coordinator processed the request.
    pub datetime: DateTime<Utc>,
}

impl UploadRecord {
    /// Create a record stamped with a fresh identifier.
    pub fn new(
        email: impl Into<String>,
        image_url: impl Into<String>,
        datetime: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: email.into(),
            image_url: image_url.into(),
            datetime,
        }
    }

    /// The processing timestamp as an ISO-8601 string with millisecond
    /// precision, e.g. `2025-01-01T12:00:00.000Z`.
    pub fn datetime_iso8601(&self) -> String {
        self.datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
