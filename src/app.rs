//! Terminal front end: wires configuration, catalog, backend and storage
//! together and mounts one widget per invocation

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::client::{ConversionBackend, ConvertError, FileHandle, HttpBackend, HttpConfig};
use crate::config::{Config, ConfigError};
use crate::observability::Metrics;
use crate::session::{SessionError, SessionStatus};
use crate::storage::{DownloadStore, SavedArtifact, StorageError};
use crate::tools::{CatalogError, ToolCatalog, ToolConfig};
use crate::widget::{Converter, UrlConverter, WidgetError};

/// URL tool used by `fetch` when none is named
pub const DEFAULT_FETCH_TOOL: &str = "video-download";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Cannot create HTTP client: {0}")]
    Client(#[from] ConvertError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error("{0}")]
    Invalid(#[from] SessionError),

    #[error("Cannot open {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tool '{tool}' takes {expected}")]
    WrongInput { tool: String, expected: &'static str },

    #[error("No tools in category '{0}'")]
    UnknownCategory(String),

    #[error("{0}")]
    ConversionFailed(String),
}

/// Shared, immutable application state
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub catalog: Arc<ToolCatalog>,
    pub backend: Arc<dyn ConversionBackend>,
    pub store: Arc<DownloadStore>,
    pub metrics: Arc<Metrics>,
}

impl AppContext {
    /// Build the HTTP backend and local download store from `config`
    pub fn new(config: Config) -> Result<Self, AppError> {
        let backend = HttpBackend::new(HttpConfig::from(&config.client))?;
        let store = DownloadStore::local(&config.downloads.dir)?;
        Ok(Self::with_parts(config, Arc::new(backend), store))
    }

    pub fn with_parts(
        config: Config,
        backend: Arc<dyn ConversionBackend>,
        store: DownloadStore,
    ) -> Self {
        let catalog = config.catalog();
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            backend,
            store: Arc::new(store),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Store to write into: `out` if given, else the configured directory
    pub fn store_for(&self, out: Option<&Path>) -> Result<Arc<DownloadStore>, AppError> {
        match out {
            Some(dir) => Ok(Arc::new(DownloadStore::local(dir)?)),
            None => Ok(self.store.clone()),
        }
    }

    /// Mount the file widget for `tool_id`
    pub fn converter(&self, tool_id: &str) -> Result<Converter, AppError> {
        let tool = self.catalog.get(tool_id)?;
        if tool.is_url_tool() {
            return Err(AppError::WrongInput {
                tool: tool.id.clone(),
                expected: "a URL; use `fetch`",
            });
        }

        Ok(Converter::new(tool, self.backend.clone())
            .with_upload_limit(self.config.client.max_upload_bytes)
            .with_metrics(self.metrics.clone()))
    }

    /// Mount the URL widget for `tool_id`
    pub fn url_converter(&self, tool_id: &str) -> Result<UrlConverter, AppError> {
        let tool = self.catalog.get(tool_id)?;
        if !tool.is_url_tool() {
            return Err(AppError::WrongInput {
                tool: tool.id.clone(),
                expected: "files; use `convert`",
            });
        }

        Ok(UrlConverter::new(tool, self.backend.clone()).with_metrics(self.metrics.clone()))
    }

    /// Upload `paths` to `tool_id` and save the result into `store`
    pub async fn convert_files(
        &self,
        tool_id: &str,
        paths: &[PathBuf],
        option: Option<&str>,
        store: &DownloadStore,
    ) -> Result<SavedArtifact, AppError> {
        let mut converter = self.converter(tool_id)?;

        let files = paths
            .iter()
            .map(|path| {
                FileHandle::open(path).map_err(|source| AppError::File {
                    path: path.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        converter.pick_files(files)?;
        if let Some(value) = option {
            converter.choose_option(value)?;
        }

        let spinner = spinner(format!("Converting with {}", converter.tool().title));
        let outcome = converter.convert().await.map(status_result);
        spinner.finish_and_clear();
        outcome??;

        let saved = converter.save_to(store).await?;
        info!(tool = tool_id, location = %saved.location, "Conversion saved");
        Ok(saved)
    }

    /// Have the backend fetch `url` and save the result into `store`
    pub async fn fetch_url(
        &self,
        tool_id: Option<&str>,
        url: &str,
        format: Option<&str>,
        store: &DownloadStore,
    ) -> Result<SavedArtifact, AppError> {
        let tool_id = tool_id.unwrap_or(DEFAULT_FETCH_TOOL);
        let mut converter = self.url_converter(tool_id)?;

        converter.set_url(url)?;
        if let Some(format) = format {
            converter.choose_format(format)?;
        }

        let spinner = spinner(format!("Downloading as {}", converter.selected_format()));
        let outcome = converter.convert().await.map(status_result);
        spinner.finish_and_clear();
        outcome??;

        let saved = converter.save_to(store).await?;
        info!(tool = tool_id, location = %saved.location, "Download saved");
        Ok(saved)
    }
}

fn status_result(status: &SessionStatus) -> Result<(), AppError> {
    match status {
        SessionStatus::Success(_) => Ok(()),
        SessionStatus::Error(message) => Err(AppError::ConversionFailed(message.clone())),
        SessionStatus::Idle | SessionStatus::Converting => Err(AppError::ConversionFailed(
            "Conversion did not complete".to_string(),
        )),
    }
}

/// Catalog listing grouped by category, optionally narrowed to one
pub fn render_tool_list(catalog: &ToolCatalog, category: Option<&str>) -> Result<String, AppError> {
    let groups = catalog.by_category();
    let mut out = String::new();

    for (name, tools) in &groups {
        if category.is_some_and(|wanted| !wanted.eq_ignore_ascii_case(name)) {
            continue;
        }

        out.push_str(name);
        out.push('\n');
        for tool in tools {
            out.push_str(&format_tool_line(tool));
            out.push('\n');
        }
    }

    match category {
        Some(wanted) if out.is_empty() => Err(AppError::UnknownCategory(wanted.to_string())),
        _ => Ok(out),
    }
}

fn format_tool_line(tool: &ToolConfig) -> String {
    let mut line = format!("  {:<18} {}", tool.id, tool.title);
    if !tool.options.is_empty() {
        let values: Vec<&str> = tool.options.iter().map(|opt| opt.value.as_str()).collect();
        line.push_str(&format!(" [{}]", values.join("|")));
    } else if tool.free_option {
        line.push_str(&format!(" [{}]", tool.option_label.to_lowercase()));
    }
    line
}

/// Spinner on stderr; hidden when stderr is not a terminal
fn spinner(message: String) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg} ({elapsed})") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_list_groups_by_category() {
        let catalog = ToolCatalog::with_builtin();
        let listing = render_tool_list(&catalog, None).unwrap();
        assert!(listing.contains("pdf\n"));
        assert!(listing.contains("image-convert"));
        assert!(listing.contains("[23|28|35]"));
        assert!(listing.contains("[enter password]"));
    }

    #[test]
    fn test_tool_list_filters_category() {
        let catalog = ToolCatalog::with_builtin();
        let listing = render_tool_list(&catalog, Some("media")).unwrap();
        assert!(listing.contains("video-download"));
        assert!(!listing.contains("pdf-merge"));

        assert!(matches!(
            render_tool_list(&catalog, Some("spreadsheets")),
            Err(AppError::UnknownCategory(_))
        ));
    }
}
