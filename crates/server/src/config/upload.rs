use serde::Deserialize;

/// Deployment identifiers for the upload workflow.
///
/// ```toml
/// [upload]
/// bucket = "cc-aws-workshop2-images"
/// table_name = "ImageUploads"
/// topic_arn = "arn:aws:sns:us-east-1:000000000000:ImageUploadNotifications"
/// url_ttl_seconds = 60
/// ```
#[derive(Debug, Deserialize)]
pub struct UploadConfig {
    /// Bucket the presigned URLs write to.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Table receiving one record per accepted request.
    #[serde(default = "default_table_name")]
    pub table_name: String,
    /// Topic the upload notification is published to.
    #[serde(default = "default_topic_arn")]
    pub topic_arn: String,
    /// Validity window of issued URLs.
    #[serde(default = "default_url_ttl")]
    pub url_ttl_seconds: u64,
    /// Base used for stored image URLs instead of the bucket's S3 host.
    pub public_base_url: Option<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            table_name: default_table_name(),
            topic_arn: default_topic_arn(),
            url_ttl_seconds: default_url_ttl(),
            public_base_url: None,
        }
    }
}

fn default_bucket() -> String {
    "cc-aws-workshop2-images".to_owned()
}

fn default_table_name() -> String {
    "ImageUploads".to_owned()
}

fn default_topic_arn() -> String {
    "arn:aws:sns:us-east-1:000000000000:ImageUploadNotifications".to_owned()
}

fn default_url_ttl() -> u64 {
    60
}
