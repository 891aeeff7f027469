use serde::{Deserialize, Serialize};

/// The bucket uploads are written to, and how its objects are addressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageTarget {
    /// Bucket name.
    pub bucket: String,

    /// Optional public base URL (e.g. a CDN or an S3-compatible endpoint).
    /// When unset, the virtual-hosted S3 address of the bucket is used.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl StorageTarget {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            public_base_url: None,
        }
    }

    #[must_use]
    pub fn with_public_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.public_base_url = Some(base_url.into());
        self
    }

    /// Base address for objects in this bucket, without a trailing slash.
    pub fn base_url(&self) -> String {
        match &self.public_base_url {
            Some(base) => base.trim_end_matches('/').to_owned(),
            None => format!("https://{}.s3.amazonaws.com", self.bucket),
        }
    }

    /// Address the object named `key` will occupy once uploaded.
    ///
    /// The address is constructed, not looked up: the object may never exist.
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{key}", self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_s3_address() {
        let target = StorageTarget::new("cc-aws-workshop2-images");
        assert_eq!(
            target.object_url("cat.png"),
            "https://cc-aws-workshop2-images.s3.amazonaws.com/cat.png"
        );
    }

    #[test]
    fn custom_base_url_strips_trailing_slash() {
        let target =
            StorageTarget::new("images").with_public_base_url("http://localhost:4566/images/");
        assert_eq!(
            target.object_url("cat.png"),
            "http://localhost:4566/images/cat.png"
        );
    }

    #[test]
    fn key_is_not_escaped() {
        let target = StorageTarget::new("b");
        assert_eq!(
            target.object_url("a/b c.png"),
            "https://b.s3.amazonaws.com/a/b c.png"
        );
    }
}
