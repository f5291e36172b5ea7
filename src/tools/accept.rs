//! `<input accept>`-style file type filters
//!
//! A filter is a comma-separated list of extensions (`.pdf`) and media types
//! (`image/png`, `video/*`). Media types are matched against the type guessed
//! from the file extension.

use mime::Mime;

#[derive(Debug, Clone, PartialEq)]
enum AcceptRule {
    Extension(String),
    MediaType(Mime),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptFilter {
    rules: Vec<AcceptRule>,
}

impl AcceptFilter {
    pub fn parse(list: &str) -> Self {
        let rules = list
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .filter_map(|entry| {
                if let Some(ext) = entry.strip_prefix('.') {
                    Some(AcceptRule::Extension(ext.to_ascii_lowercase()))
                } else {
                    entry.parse::<Mime>().ok().map(AcceptRule::MediaType)
                }
            })
            .collect();

        Self { rules }
    }

    /// An empty filter accepts all files
    pub fn accepts_all(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn matches(&self, file_name: &str) -> bool {
        if self.accepts_all() {
            return true;
        }

        let Some(ext) = extension_of(file_name) else {
            return false;
        };
        let guessed = mime_for_extension(&ext);

        self.rules.iter().any(|rule| match rule {
            AcceptRule::Extension(wanted) => *wanted == ext,
            AcceptRule::MediaType(wanted) => guessed.as_ref().is_some_and(|actual| {
                actual.type_() == wanted.type_()
                    && (wanted.subtype() == mime::STAR || actual.subtype() == wanted.subtype())
            }),
        })
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Media type for the extensions the catalog deals with
pub fn mime_for_extension(ext: &str) -> Option<Mime> {
    let essence = match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "mp4" => "video/mp4",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "ogg" => "audio/ogg",
        "aac" => "audio/aac",
        "m4a" => "audio/mp4",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "json" => "application/json",
        "csv" => "text/csv",
        "md" => "text/markdown",
        "txt" => "text/plain",
        _ => return None,
    };
    essence.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_accepts_everything() {
        let filter = AcceptFilter::parse("");
        assert!(filter.accepts_all());
        assert!(filter.matches("anything.bin"));
        assert!(filter.matches("no-extension"));
    }

    #[test]
    fn test_extension_rules() {
        let filter = AcceptFilter::parse(".docx, .DOC");
        assert!(filter.matches("report.docx"));
        assert!(filter.matches("LEGACY.DOC"));
        assert!(!filter.matches("report.pdf"));
        assert!(!filter.matches("docx"));
    }

    #[test]
    fn test_wildcard_media_types() {
        let filter = AcceptFilter::parse("video/*,audio/*");
        assert!(filter.matches("clip.mp4"));
        assert!(filter.matches("song.flac"));
        assert!(!filter.matches("photo.png"));
        assert!(!filter.matches("mystery.xyz"));
    }

    #[test]
    fn test_exact_media_type() {
        let filter = AcceptFilter::parse("image/jpeg,image/png");
        assert!(filter.matches("a.jpg"));
        assert!(filter.matches("b.PNG"));
        assert!(!filter.matches("c.gif"));
    }
}
