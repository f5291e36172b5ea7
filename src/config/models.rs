use crate::humanize::ByteSize;
use crate::tools::{ToolCatalog, ToolConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub downloads: DownloadsConfig,
    /// Catalog entries keyed by tool id, merged over the built-in catalog
    #[serde(default)]
    pub tools: BTreeMap<String, ToolConfig>,
}

/// Conversion backend connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Whole-request timeout; the transport default applies when unset
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Files above this size are rejected before upload
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: ByteSize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: None,
            connect_timeout_secs: None,
            user_agent: default_user_agent(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_user_agent() -> String {
    format!("convbox/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_upload_bytes() -> ByteSize {
    ByteSize(100 * 1024 * 1024) // 100 MB
}

/// Where converted files are written
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadsConfig {
    #[serde(default = "default_downloads_dir")]
    pub dir: PathBuf,
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self {
            dir: default_downloads_dir(),
        }
    }
}

fn default_downloads_dir() -> PathBuf {
    PathBuf::from("downloads")
}

impl Config {
    /// Built-in catalog with the configured `[tools.*]` entries applied
    pub fn catalog(&self) -> ToolCatalog {
        let mut catalog = ToolCatalog::with_builtin();
        catalog.extend_from(&self.tools);
        catalog
    }
}
