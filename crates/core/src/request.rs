use serde::{Deserialize, Serialize};

use crate::error::UploadError;

/// A client's request to upload one file.
///
/// `filename` is used verbatim as the storage object key; no path
/// sanitization is applied. `content_type` is advisory and `email` is an
/// opaque identifier, neither is checked beyond being present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Name of the file, and the object key it will be stored under.
    pub filename: String,

    /// Declared MIME type (e.g. `image/png`).
    pub content_type: String,

    /// Identifier of the user initiating the upload.
    pub email: String,
}

impl UploadRequest {
    /// Create a new request from its three fields.
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            email: email.into(),
        }
    }

    /// Parse and validate a raw request body.
    ///
    /// Both unparseable JSON and a structurally incomplete object are
    /// reported as [`UploadError::InvalidRequest`].
    pub fn parse(body: &[u8]) -> Result<Self, UploadError> {
        let request: Self = serde_json::from_slice(body)?;
        request.validate()?;
        Ok(request)
    }

    /// Check that every required field is non-empty.
    pub fn validate(&self) -> Result<(), UploadError> {
        let fields = [
            ("filename", &self.filename),
            ("contentType", &self.content_type),
            ("email", &self.email),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                return Err(UploadError::InvalidRequest(format!(
                    "field '{name}' must not be empty"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_camel_case_body() {
        let body = br#"{"filename":"cat.png","contentType":"image/png","email":"a@b.com"}"#;
        let request = UploadRequest::parse(body).unwrap();
        assert_eq!(request, UploadRequest::new("cat.png", "image/png", "a@b.com"));
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        let body = br#"{"filename":"a","contentType":"b","email":"c","extra":1}"#;
        assert!(UploadRequest::parse(body).is_ok());
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = UploadRequest::parse(b"not json").unwrap_err();
        assert!(matches!(err, UploadError::InvalidRequest(_)));
    }

    #[test]
    fn parse_rejects_missing_field() {
        let body = br#"{"filename":"cat.png","email":"a@b.com"}"#;
        let err = UploadRequest::parse(body).unwrap_err();
        assert!(err.to_string().contains("contentType"));
    }

    #[test]
    fn parse_rejects_wrong_field_type() {
        let body = br#"{"filename":42,"contentType":"image/png","email":"a@b.com"}"#;
        assert!(UploadRequest::parse(body).is_err());
    }

    #[test]
    fn validate_rejects_empty_filename() {
        let err = UploadRequest::new("", "image/png", "a@b.com")
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid request: field 'filename' must not be empty"
        );
    }

    #[test]
    fn whitespace_filename_is_a_valid_key() {
        let request = UploadRequest::new(" ", "image/png", "a@b.com");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn filename_is_kept_verbatim() {
        let body =
            br#"{"filename":"../dir/My Cat.png","contentType":"x/y","email":"not-an-email"}"#;
        let request = UploadRequest::parse(body).unwrap();
        assert_eq!(request.filename, "../dir/My Cat.png");
        assert_eq!(request.email, "not-an-email");
    }
}
