//! Destination for downloaded artifacts
//! Uses Apache Arrow object_store crate

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::{ObjectStore, path::Path as StoragePath};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::session::naming::sanitize_filename;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("'{0}' is not a usable file name")]
    InvalidName(String),

    #[error("Cannot prepare download directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Object store error: {0}")]
    ObjectStoreError(#[from] object_store::Error),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

/// Where a saved artifact ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    pub key: String,
    /// Filesystem path for local stores, `memory://<key>` otherwise
    pub location: String,
    pub size: usize,
}

/// Download store wrapping object_store
#[derive(Debug, Clone)]
pub struct DownloadStore {
    store: Arc<dyn ObjectStore>,
    local: Option<Arc<LocalFileSystem>>,
}

impl DownloadStore {
    /// Store files under `dir`, creating it if needed
    pub fn local(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|source| StorageError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;

        let root = dir.canonicalize().map_err(|source| StorageError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;
        let local = Arc::new(LocalFileSystem::new_with_prefix(&root)?);

        Ok(Self {
            store: local.clone(),
            local: Some(local),
        })
    }

    /// In-memory storage for testing
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            local: None,
        }
    }

    /// Save `data` under the sanitized `name`, replacing any previous file
    pub async fn save(&self, name: &str, data: Bytes) -> Result<SavedArtifact> {
        let key = sanitize_filename(name).ok_or_else(|| StorageError::InvalidName(name.to_string()))?;
        let path = object_path(&key);
        let size = data.len();

        self.store.put(&path, data.into()).await?;

        let location = self.location_of(&path)?;
        tracing::info!(key = %key, size, location = %location, "Saved download");

        Ok(SavedArtifact {
            key,
            location,
            size,
        })
    }

    pub async fn load(&self, key: &str) -> Result<Bytes> {
        let path = object_path(key);

        let result = match self.store.get(&path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(result.bytes().await?)
    }

    /// Check if key exists
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let path = object_path(key);

        match self.store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Where object_store actually put `path`
    fn location_of(&self, path: &StoragePath) -> Result<String> {
        match &self.local {
            Some(local) => Ok(local.path_to_filesystem(path)?.display().to_string()),
            None => Ok(format!("memory://{path}")),
        }
    }
}

/// Object path whose on-disk name is the key itself.
///
/// `StoragePath::from` percent-encodes `%`, `#`, `[` and friends, which would
/// leave the file under a different name than the one reported.
fn object_path(key: &str) -> StoragePath {
    StoragePath::parse(key).unwrap_or_else(|_| StoragePath::from(key))
}
