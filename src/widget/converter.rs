use std::sync::Arc;
use tracing::debug;

use super::view::ConverterView;
use super::{WidgetError, run_conversion};
use crate::client::{ConversionBackend, FileHandle};
use crate::humanize::ByteSize;
use crate::observability::Metrics;
use crate::session::{ConversionSession, SessionError, SessionStatus, converted_filename};
use crate::storage::{DownloadStore, SavedArtifact};
use crate::tools::{AcceptFilter, ToolConfig};

/// Upload-convert-download widget for file tools
pub struct Converter {
    session: ConversionSession,
    backend: Arc<dyn ConversionBackend>,
    metrics: Arc<Metrics>,
    accept: AcceptFilter,
    upload_limit: Option<ByteSize>,
}

impl Converter {
    pub fn new(tool: Arc<ToolConfig>, backend: Arc<dyn ConversionBackend>) -> Self {
        let accept = tool.accept_filter();
        Self {
            session: ConversionSession::new(tool),
            backend,
            metrics: Arc::new(Metrics::new()),
            accept,
            upload_limit: None,
        }
    }

    /// Reject files larger than `limit` when they are selected
    pub fn with_upload_limit(mut self, limit: ByteSize) -> Self {
        self.upload_limit = Some(limit);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn tool(&self) -> &ToolConfig {
        self.session.tool()
    }

    pub fn session(&self) -> &ConversionSession {
        &self.session
    }

    pub fn status(&self) -> &SessionStatus {
        self.session.status()
    }

    /// Files chosen through a picker
    ///
    /// The selection is all or nothing: one unacceptable file rejects it.
    pub fn pick_files(&mut self, files: Vec<FileHandle>) -> Result<(), SessionError> {
        for file in &files {
            self.check_file(file)?;
        }
        self.session.add_files(files)
    }

    /// Files dropped onto the widget
    ///
    /// Acceptable files are added; the rest are returned as rejections.
    pub fn drop_files(&mut self, files: Vec<FileHandle>) -> Vec<SessionError> {
        let mut rejected = Vec::new();
        let mut accepted = Vec::with_capacity(files.len());

        for file in files {
            match self.check_file(&file) {
                Ok(()) => accepted.push(file),
                Err(err) => {
                    debug!(file = %file.name(), error = %err, "Dropped file rejected");
                    rejected.push(err);
                }
            }
        }

        if let Err(err) = self.session.add_files(accepted) {
            rejected.push(err);
        }
        rejected
    }

    pub fn remove_file(&mut self, index: usize) -> Result<FileHandle, SessionError> {
        self.session.remove_file(index)
    }

    pub fn choose_option(&mut self, value: &str) -> Result<(), SessionError> {
        self.session.select_option(value)
    }

    /// Whether the convert trigger is enabled
    pub fn can_submit(&self) -> bool {
        self.session.has_input()
            && matches!(
                self.session.status(),
                SessionStatus::Idle | SessionStatus::Error(_)
            )
    }

    pub async fn convert(&mut self) -> Result<&SessionStatus, SessionError> {
        run_conversion(&mut self.session, self.backend.as_ref(), &self.metrics).await
    }

    /// Suggested name for the converted file, once there is one
    pub fn download_name(&self) -> Option<String> {
        self.session.artifact()?;

        let tool = self.session.tool();
        // Free-form values (passwords) never end up in a file name
        let option = if tool.free_option {
            None
        } else {
            self.session.selected_option()
        };

        Some(converted_filename(
            self.session.files().first().map(FileHandle::name),
            tool.output_extension.as_deref(),
            option,
        ))
    }

    pub async fn save_to(&self, store: &DownloadStore) -> Result<SavedArtifact, WidgetError> {
        let (artifact, name) = match (self.session.artifact(), self.download_name()) {
            (Some(artifact), Some(name)) => (artifact, name),
            _ => return Err(WidgetError::NoResult),
        };

        Ok(store.save(&name, artifact.bytes.clone()).await?)
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn view(&self) -> ConverterView {
        ConverterView::build(&self.session, self.can_submit(), self.download_name())
    }

    fn check_file(&self, file: &FileHandle) -> Result<(), SessionError> {
        if !self.accept.matches(file.name()) {
            return Err(SessionError::RejectedFile {
                name: file.name().to_string(),
                accept: self.tool().accept.clone(),
            });
        }

        if let Some(limit) = self.upload_limit {
            if file.size() > limit {
                return Err(SessionError::FileTooLarge {
                    name: file.name().to_string(),
                    size: file.size(),
                    limit,
                });
            }
        }

        Ok(())
    }
}
