use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::{Artifact, ConversionRequest, ConvertError, FileHandle};
use crate::humanize::ByteSize;
use crate::tools::ToolConfig;

/// Format used by URL tools that configure no format list
const DEFAULT_URL_FORMAT: &str = "mp4";

/// Request lifecycle of one session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Idle,
    Converting,
    Success(Artifact),
    Error(String),
}

impl SessionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Converting => "converting",
            SessionStatus::Success(_) => "success",
            SessionStatus::Error(_) => "error",
        }
    }
}

/// Reasons a session operation was refused
///
/// None of these reach the backend; they are user-correctable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please select a file")]
    NoFile,

    #[error("Please enter a URL")]
    NoUrl,

    #[error("Please {}", label.to_lowercase())]
    OptionRequired { label: String },

    #[error("'{0}' is not one of the available options")]
    UnknownOption(String),

    #[error("A conversion is already in progress")]
    Busy,

    #[error("This conversion is complete; reset to start another")]
    AlreadyCompleted,

    #[error("'{name}' is not an accepted file type (expected {accept})")]
    RejectedFile { name: String, accept: String },

    #[error("'{name}' is {}, above the {limit} upload limit", size.as_megabytes())]
    FileTooLarge {
        name: String,
        size: ByteSize,
        limit: ByteSize,
    },

    #[error("No selected file at position {0}")]
    NoSuchFile(usize),

    #[error("This tool takes one file; {0} were selected")]
    SingleFileOnly(usize),
}

/// Mutable state of one widget instance
///
/// Invariants, upheld by every method:
/// - an artifact exists only in [`SessionStatus::Success`]
/// - an error message exists only in [`SessionStatus::Error`]
/// - input (files or URL) is absent only while [`SessionStatus::Idle`]
#[derive(Debug, Clone)]
pub struct ConversionSession {
    id: Uuid,
    tool: Arc<ToolConfig>,
    files: Vec<FileHandle>,
    url: Option<String>,
    selected_option: Option<String>,
    status: SessionStatus,
}

impl ConversionSession {
    pub fn new(tool: Arc<ToolConfig>) -> Self {
        let selected_option = initial_option(&tool);
        Self {
            id: Uuid::new_v4(),
            tool,
            files: Vec::new(),
            url: None,
            selected_option,
            status: SessionStatus::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tool(&self) -> &ToolConfig {
        &self.tool
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.selected_option.as_deref()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn artifact(&self) -> Option<&Artifact> {
        match &self.status {
            SessionStatus::Success(artifact) => Some(artifact),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            SessionStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_converting(&self) -> bool {
        self.status == SessionStatus::Converting
    }

    pub fn has_input(&self) -> bool {
        if self.tool.is_url_tool() {
            self.url.is_some()
        } else {
            !self.files.is_empty()
        }
    }

    /// Add selected files
    ///
    /// Multi-file tools append; single-file tools replace the current file
    /// and refuse a selection of more than one. A prior result or error is
    /// discarded.
    pub fn add_files(&mut self, files: Vec<FileHandle>) -> Result<(), SessionError> {
        self.ensure_not_busy()?;
        if files.is_empty() {
            return Ok(());
        }
        if !self.tool.multiple && files.len() > 1 {
            return Err(SessionError::SingleFileOnly(files.len()));
        }

        if self.tool.multiple {
            self.files.extend(files);
        } else {
            self.files = files;
        }

        self.status = SessionStatus::Idle;
        debug!(session_id = %self.id, files = self.files.len(), "Files selected");
        Ok(())
    }

    pub fn remove_file(&mut self, index: usize) -> Result<FileHandle, SessionError> {
        self.ensure_not_busy()?;
        if index >= self.files.len() {
            return Err(SessionError::NoSuchFile(index));
        }

        let removed = self.files.remove(index);
        self.status = SessionStatus::Idle;
        Ok(removed)
    }

    /// Set the URL for URL tools; blank input clears it
    pub fn set_url(&mut self, url: &str) -> Result<(), SessionError> {
        self.ensure_not_busy()?;
        let url = url.trim();
        self.url = (!url.is_empty()).then(|| url.to_string());
        self.status = SessionStatus::Idle;
        Ok(())
    }

    /// Choose the discrete option
    ///
    /// Changing the option after a success discards the result, since the
    /// artifact no longer matches the selection. An error stays visible.
    pub fn select_option(&mut self, value: &str) -> Result<(), SessionError> {
        self.ensure_not_busy()?;
        if !self.tool.accepts_option(value) {
            return Err(SessionError::UnknownOption(value.to_string()));
        }

        self.selected_option = Some(value.to_string());
        if matches!(self.status, SessionStatus::Success(_)) {
            self.status = SessionStatus::Idle;
        }
        Ok(())
    }

    /// Validate and enter `Converting`, yielding the request to send
    ///
    /// Missing input leaves the session untouched. A missing option with
    /// input present moves the session to `Error`.
    pub fn begin(&mut self) -> Result<ConversionRequest, SessionError> {
        match self.status {
            SessionStatus::Converting => return Err(SessionError::Busy),
            SessionStatus::Success(_) => return Err(SessionError::AlreadyCompleted),
            SessionStatus::Idle | SessionStatus::Error(_) => {}
        }

        let payload = if self.tool.is_url_tool() {
            let url = self.url.clone().ok_or(SessionError::NoUrl)?;
            ConversionRequest::url(&self.tool.endpoint, url)
        } else {
            if self.files.is_empty() {
                return Err(SessionError::NoFile);
            }
            ConversionRequest::files(
                &self.tool.endpoint,
                self.tool.file_field(),
                self.files.clone(),
            )
        };

        let chosen = self
            .selected_option
            .as_deref()
            .filter(|value| self.tool.accepts_option(value));

        if self.tool.requires_option() && chosen.is_none() {
            let err = SessionError::OptionRequired {
                label: self.tool.option_label.clone(),
            };
            self.status = SessionStatus::Error(err.to_string());
            return Err(err);
        }

        let request = match (chosen, self.option_field()) {
            (Some(value), Some(field)) => payload.with_option(field, value),
            _ => payload,
        };

        self.status = SessionStatus::Converting;
        Ok(request)
    }

    /// Apply the network outcome of the request returned by [`begin`](Self::begin)
    ///
    /// Outcomes arriving outside `Converting` (after a reset) are dropped.
    pub fn complete(&mut self, outcome: Result<Artifact, ConvertError>) -> &SessionStatus {
        if !self.is_converting() {
            warn!(
                session_id = %self.id,
                status = self.status.label(),
                "Ignoring conversion outcome for a session that is not converting"
            );
            return &self.status;
        }

        self.status = match outcome {
            Ok(artifact) if artifact.is_empty() => {
                SessionStatus::Error(ConvertError::EmptyResult.user_message())
            }
            Ok(artifact) => SessionStatus::Success(artifact),
            Err(err) => SessionStatus::Error(err.user_message()),
        };
        &self.status
    }

    /// Back to the tool's initial state
    ///
    /// Accepted in every state so a session whose request was abandoned can
    /// start over.
    pub fn reset(&mut self) {
        self.files.clear();
        self.url = None;
        self.selected_option = initial_option(&self.tool);
        self.status = SessionStatus::Idle;
    }

    fn option_field(&self) -> Option<&str> {
        match &self.tool.option_field {
            Some(field) => Some(field),
            None if self.tool.is_url_tool() => Some("format"),
            None => None,
        }
    }

    fn ensure_not_busy(&self) -> Result<(), SessionError> {
        if self.is_converting() {
            Err(SessionError::Busy)
        } else {
            Ok(())
        }
    }
}

/// Option selected when a session starts or resets
///
/// URL tools always carry a format: the configured default, else the first
/// listed format, else `mp4`.
pub fn initial_option(tool: &ToolConfig) -> Option<String> {
    if let Some(default) = &tool.default_option {
        return Some(default.clone());
    }
    if tool.is_url_tool() {
        let first = tool.options.first().map(|opt| opt.value.clone());
        return Some(first.unwrap_or_else(|| DEFAULT_URL_FORMAT.to_string()));
    }
    None
}
