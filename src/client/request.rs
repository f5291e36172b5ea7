use super::error::{CONVERSION_FAILED, DOWNLOAD_FAILED};
use super::file::FileHandle;

/// What a request uploads
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Files sent under `field` (`file` once, or `files` repeated)
    Files {
        field: &'static str,
        files: Vec<FileHandle>,
    },
    /// Remote URL sent as the `url` text field
    Url(String),
}

/// Scalar form field carrying the chosen option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

/// One submission, consumed by a single backend call
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub endpoint: String,
    pub payload: Payload,
    pub option: Option<FormField>,
}

impl ConversionRequest {
    pub fn files(
        endpoint: impl Into<String>,
        field: &'static str,
        files: Vec<FileHandle>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            payload: Payload::Files { field, files },
            option: None,
        }
    }

    pub fn url(endpoint: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            payload: Payload::Url(url.into()),
            option: None,
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.option = Some(FormField {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Message used when the server fails without a `detail`
    pub fn failure_fallback(&self) -> &'static str {
        match self.payload {
            Payload::Files { .. } => CONVERSION_FAILED,
            Payload::Url(_) => DOWNLOAD_FAILED,
        }
    }
}
