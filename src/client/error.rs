use thiserror::Error;

/// Shown when an error body cannot be decoded at all
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// Shown when the transport failed without a message of its own
pub const NETWORK_ERROR: &str = "Network error. Please check if the backend is running.";

/// Fallback for file uploads whose error body carries no `detail`
pub const CONVERSION_FAILED: &str = "Conversion failed. Please try again.";

/// Fallback for URL downloads whose error body carries no `detail`
pub const DOWNLOAD_FAILED: &str = "Download failed. Please check the URL.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Non-2xx response; `message` is already decoded from the body
    #[error("{message}")]
    Server { status: u16, message: String },

    /// No response reached the client
    #[error("{0}")]
    Transport(String),

    #[error("The request timed out.")]
    Timeout,

    #[error("The server returned an empty file.")]
    EmptyResult,

    #[error("Could not read '{name}': {message}")]
    Io { name: String, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ConvertError {
    /// Text surfaced to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            ConvertError::Transport(message) if message.trim().is_empty() => {
                NETWORK_ERROR.to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ConvertError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
