use bytes::Bytes;
use chrono::{DateTime, Utc};
use mime::Mime;

/// Binary result of a successful conversion
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub bytes: Bytes,
    pub content_type: Mime,
    /// Raw `Content-Disposition` header, if the server sent one
    pub content_disposition: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl Artifact {
    /// Build an artifact from a response body and its headers
    ///
    /// A missing or unparsable content type becomes `application/octet-stream`.
    pub fn new(
        bytes: impl Into<Bytes>,
        content_type: Option<&str>,
        content_disposition: Option<String>,
    ) -> Self {
        let content_type = content_type
            .and_then(|value| value.parse::<Mime>().ok())
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);

        Self {
            bytes: bytes.into(),
            content_type,
            content_disposition,
            received_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
