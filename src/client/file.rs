use bytes::Bytes;
use mime::Mime;
use std::io;
use std::path::{Path, PathBuf};

use crate::humanize::ByteSize;
use crate::tools::mime_for_extension;

#[derive(Debug, Clone, PartialEq)]
enum FileSource {
    Disk(PathBuf),
    Memory(Bytes),
}

/// A user-selected file
///
/// Only name and size are known up front; contents are read when the
/// request is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHandle {
    name: String,
    size: u64,
    source: FileSource,
}

impl FileHandle {
    /// Reference a file on disk
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            size: metadata.len(),
            source: FileSource::Disk(path.to_path_buf()),
        })
    }

    /// Wrap bytes already held in memory
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> ByteSize {
        ByteSize(self.size)
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Disk(path) => Some(path),
            FileSource::Memory(_) => None,
        }
    }

    /// Media type guessed from the extension
    pub fn mime(&self) -> Option<Mime> {
        let (_, ext) = self.name.rsplit_once('.')?;
        mime_for_extension(ext)
    }

    pub async fn read(&self) -> io::Result<Bytes> {
        match &self.source {
            FileSource::Disk(path) => tokio::fs::read(path).await.map(Bytes::from),
            FileSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_reads_metadata_and_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.docx");
        std::fs::write(&path, b"hello").unwrap();

        let file = FileHandle::open(&path).unwrap();
        assert_eq!(file.name(), "report.docx");
        assert_eq!(file.size().as_u64(), 5);
        assert_eq!(file.path(), Some(path.as_path()));
        assert_eq!(file.read().await.unwrap(), Bytes::from_static(b"hello"));
    }

    #[test]
    fn test_open_rejects_directories_and_missing_files() {
        let dir = TempDir::new().unwrap();
        assert!(FileHandle::open(dir.path()).is_err());
        assert!(FileHandle::open(dir.path().join("missing.pdf")).is_err());
    }

    #[test]
    fn test_mime_guess() {
        let file = FileHandle::from_bytes("photo.JPG", vec![1, 2, 3]);
        assert_eq!(file.mime().unwrap().essence_str(), "image/jpeg");
        assert!(FileHandle::from_bytes("README", vec![]).mime().is_none());
    }
}
