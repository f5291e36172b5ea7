use std::sync::Arc;

use super::view::ConverterView;
use super::{WidgetError, run_conversion};
use crate::client::ConversionBackend;
use crate::observability::Metrics;
use crate::session::{ConversionSession, SessionError, SessionStatus, url_download_filename};
use crate::storage::{DownloadStore, SavedArtifact};
use crate::tools::ToolConfig;

/// Widget for tools that fetch a remote URL server-side
pub struct UrlConverter {
    session: ConversionSession,
    backend: Arc<dyn ConversionBackend>,
    metrics: Arc<Metrics>,
}

impl UrlConverter {
    pub fn new(tool: Arc<ToolConfig>, backend: Arc<dyn ConversionBackend>) -> Self {
        Self {
            session: ConversionSession::new(tool),
            backend,
            metrics: Arc::new(Metrics::new()),
        }
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

    pub fn set_url(&mut self, url: &str) -> Result<(), SessionError> {
        self.session.set_url(url)
    }

    pub fn choose_format(&mut self, format: &str) -> Result<(), SessionError> {
        self.session.select_option(format)
    }

    pub fn selected_format(&self) -> &str {
        self.session.selected_option().unwrap_or_default()
    }

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

    /// Name suggested by the server, else `download.<format>`
    pub fn download_name(&self) -> Option<String> {
        let artifact = self.session.artifact()?;
        Some(url_download_filename(
            artifact.content_disposition.as_deref(),
            self.selected_format(),
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
}
