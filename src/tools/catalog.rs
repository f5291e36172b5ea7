use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use super::types::{ConversionOption, InputKind, ToolConfig};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("tool not found: {0}")]
    NotFound(String),
}

/// Registry mapping tool ids to their configuration
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: BTreeMap<String, Arc<ToolConfig>>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Catalog pre-populated with the built-in tools
    pub fn with_builtin() -> Self {
        let mut catalog = Self::new();
        for tool in builtin_tools() {
            catalog.register(tool);
        }
        catalog
    }

    /// Insert or replace a tool, keyed by its id
    pub fn register(&mut self, tool: ToolConfig) {
        self.tools.insert(tool.id.clone(), Arc::new(tool));
    }

    /// Apply configured tools on top of the current entries
    ///
    /// Table names become ids, so `[tools.image-convert]` replaces the
    /// built-in image converter and unknown names add new tools.
    pub fn extend_from(&mut self, tools: &BTreeMap<String, ToolConfig>) {
        for (id, tool) in tools {
            let mut tool = tool.clone();
            tool.id = id.clone();
            self.register(tool);
        }
    }

    pub fn get(&self, id: &str) -> Result<Arc<ToolConfig>, CatalogError> {
        self.tools
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tools.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ToolConfig>> {
        self.tools.values()
    }

    /// Tools grouped by category, both levels in lexical order
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&Arc<ToolConfig>>> {
        let mut groups: BTreeMap<&str, Vec<&Arc<ToolConfig>>> = BTreeMap::new();
        for tool in self.tools.values() {
            groups.entry(tool.category.as_str()).or_default().push(tool);
        }
        groups
    }
}

/// The tool set served by the conversion backend
pub fn builtin_tools() -> Vec<ToolConfig> {
    vec![
        ToolConfig::builder()
            .id("image-convert")
            .title("Image Converter")
            .description("Convert images between formats (JPG, PNG, WEBP, GIF, etc).")
            .category("images")
            .endpoint("/convert/image")
            .accept("image/*")
            .options(vec![
                ConversionOption::new("PNG", "PNG"),
                ConversionOption::new("JPEG", "JPG"),
                ConversionOption::new("WEBP", "WebP"),
                ConversionOption::new("GIF", "GIF"),
                ConversionOption::new("BMP", "BMP"),
                ConversionOption::new("TIFF", "TIFF"),
                ConversionOption::new("PDF", "PDF"),
            ])
            .option_label("Convert to:")
            .option_field("target_format")
            .build(),
        ToolConfig::builder()
            .id("remove-bg")
            .title("AI Background Remover")
            .description("Remove the background from an image and get a transparent PNG.")
            .category("images")
            .endpoint("/convert/image/remove-bg")
            .accept("image/*")
            .output_extension("png")
            .build(),
        ToolConfig::builder()
            .id("image-filter")
            .title("Image Filters")
            .description("Apply grayscale, sepia, blur and other effects to an image.")
            .category("images")
            .endpoint("/convert/image/filter")
            .accept("image/*")
            .options(vec![
                ConversionOption::new("grayscale", "Grayscale"),
                ConversionOption::new("sepia", "Sepia"),
                ConversionOption::new("blur", "Blur"),
                ConversionOption::new("sharpen", "Sharpen"),
                ConversionOption::new("edge", "Edge"),
                ConversionOption::new("emboss", "Emboss"),
            ])
            .default_option("grayscale")
            .option_label("Filter")
            .option_field("filter_type")
            .output_extension("png")
            .build(),
        ToolConfig::builder()
            .id("strip-exif")
            .title("Remove EXIF")
            .description("Strip camera and location metadata from a photo.")
            .category("images")
            .endpoint("/convert/image/strip-exif")
            .accept("image/*")
            .output_extension("png")
            .build(),
        ToolConfig::builder()
            .id("media-convert")
            .title("Format Converter")
            .description("Convert video and audio files to different formats.")
            .category("media")
            .endpoint("/convert/media")
            .accept("video/*,audio/*")
            .options(vec![
                ConversionOption::new("mp4", "MP4 (Video)"),
                ConversionOption::new("avi", "AVI (Video)"),
                ConversionOption::new("mov", "MOV (Video)"),
                ConversionOption::new("mkv", "MKV (Video)"),
                ConversionOption::new("mp3", "MP3 (Audio)"),
                ConversionOption::new("wav", "WAV (Audio)"),
                ConversionOption::new("flac", "FLAC (Audio)"),
                ConversionOption::new("ogg", "OGG (Audio)"),
                ConversionOption::new("aac", "AAC (Audio)"),
            ])
            .option_label("Convert to:")
            .option_field("target_format")
            .build(),
        ToolConfig::builder()
            .id("video-compress")
            .title("Video Compressor")
            .description("Reduce video file size while maintaining quality.")
            .category("media")
            .endpoint("/convert/media/compress")
            .accept("video/*")
            .options(vec![
                ConversionOption::new("23", "High Quality (Larger)"),
                ConversionOption::new("28", "Balanced (Recommended)"),
                ConversionOption::new("35", "High Compression (Smaller)"),
            ])
            .default_option("28")
            .option_label("Compression Level")
            .option_field("crf")
            .output_extension("mp4")
            .build(),
        ToolConfig::builder()
            .id("video-download")
            .title("Video Downloader")
            .description("Download videos from YouTube, TikTok, Twitter, and more.")
            .category("media")
            .endpoint("/convert/media/download")
            .input(InputKind::Url)
            .options(vec![
                ConversionOption::new("mp4", "MP4 (Video)"),
                ConversionOption::new("mp3", "MP3 (Audio Only)"),
            ])
            .default_option("mp4")
            .option_label("Format")
            .option_field("format")
            .build(),
        ToolConfig::builder()
            .id("pdf-merge")
            .title("Merge PDFs")
            .description("Combine multiple PDF files into a single document. Order is preserved.")
            .category("pdf")
            .endpoint("/convert/pdf/merge")
            .accept(".pdf")
            .multiple(true)
            .output_extension("pdf")
            .build(),
        ToolConfig::builder()
            .id("pdf-protect")
            .title("Protect PDF")
            .description("Add a password to your PDF file.")
            .category("pdf")
            .endpoint("/convert/pdf/protect")
            .accept(".pdf")
            .option_label("Enter Password")
            .option_field("password")
            .free_option(true)
            .output_extension("pdf")
            .build(),
        ToolConfig::builder()
            .id("pdf-unlock")
            .title("Unlock PDF")
            .description("Remove password security from a PDF file.")
            .category("pdf")
            .endpoint("/convert/pdf/unlock")
            .accept(".pdf")
            .option_label("Enter Password")
            .option_field("password")
            .free_option(true)
            .output_extension("pdf")
            .build(),
        ToolConfig::builder()
            .id("pdf-compress")
            .title("Compress PDF")
            .description("Reduce the file size of your PDF documents.")
            .category("pdf")
            .endpoint("/convert/pdf/compress")
            .accept(".pdf")
            .output_extension("pdf")
            .build(),
        ToolConfig::builder()
            .id("pdf-split")
            .title("Split PDF")
            .description("Extract pages from a PDF, e.g. 1-3,5,7-9.")
            .category("pdf")
            .endpoint("/convert/pdf/split")
            .accept(".pdf")
            .option_label("Enter Page Range")
            .option_field("pages")
            .free_option(true)
            .output_extension("pdf")
            .build(),
        ToolConfig::builder()
            .id("pdf-rotate")
            .title("Rotate PDF")
            .description("Rotate every page of a PDF.")
            .category("pdf")
            .endpoint("/convert/pdf/rotate")
            .accept(".pdf")
            .options(vec![
                ConversionOption::new("90", "90° Clockwise"),
                ConversionOption::new("180", "180°"),
                ConversionOption::new("270", "270° (90° Counter-clockwise)"),
            ])
            .default_option("90")
            .option_label("Rotation Angle")
            .option_field("angle")
            .output_extension("pdf")
            .build(),
        ToolConfig::builder()
            .id("ocr-searchable-pdf")
            .title("Searchable PDF")
            .description("Run OCR on a scanned image and get a PDF with selectable text.")
            .category("documents")
            .endpoint("/convert/ocr/searchable-pdf")
            .accept(".jpg,.jpeg,.png,.tiff,.tif,.bmp")
            .output_extension("pdf")
            .build(),
        ToolConfig::builder()
            .id("pdf-to-word")
            .title("PDF to Word")
            .description("Convert your PDF documents to editable Word files.")
            .category("documents")
            .endpoint("/convert/pdf-to-word")
            .accept(".pdf")
            .output_extension("docx")
            .build(),
        ToolConfig::builder()
            .id("word-to-pdf")
            .title("Word to PDF")
            .description("Convert Word documents to professional PDF files.")
            .category("documents")
            .endpoint("/convert/word-to-pdf")
            .accept(".docx,.doc")
            .output_extension("pdf")
            .build(),
        ToolConfig::builder()
            .id("csv-to-excel")
            .title("CSV to Excel")
            .description("Convert CSV data files to Excel spreadsheets.")
            .category("documents")
            .endpoint("/convert/csv-to-excel")
            .accept(".csv")
            .output_extension("xlsx")
            .build(),
        ToolConfig::builder()
            .id("markdown-to-html")
            .title("Markdown to HTML")
            .description("Convert Markdown text to HTML code.")
            .category("documents")
            .endpoint("/convert/markdown-to-html")
            .accept(".md")
            .output_extension("html")
            .build(),
        ToolConfig::builder()
            .id("archive-extract")
            .title("Extract Archive")
            .description("Extract files from ZIP archives.")
            .category("archives")
            .endpoint("/convert/archive/extract")
            .accept(".zip")
            .build(),
        ToolConfig::builder()
            .id("archive-create")
            .title("Create Archive")
            .description("Bundle several files into one ZIP archive.")
            .category("archives")
            .endpoint("/convert/archive/create")
            .multiple(true)
            .output_extension("zip")
            .build(),
        ToolConfig::builder()
            .id("json-to-yaml")
            .title("JSON to YAML")
            .description("Convert JSON files to YAML format.")
            .category("utilities")
            .endpoint("/convert/utils/json-to-yaml")
            .accept(".json")
            .output_extension("yaml")
            .build(),
        ToolConfig::builder()
            .id("yaml-to-json")
            .title("YAML to JSON")
            .description("Convert YAML files to JSON format.")
            .category("utilities")
            .endpoint("/convert/utils/yaml-to-json")
            .accept(".yaml,.yml")
            .output_extension("json")
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_lookup() {
        let catalog = ToolCatalog::with_builtin();
        let tool = catalog.get("image-convert").unwrap();
        assert_eq!(tool.endpoint, "/convert/image");
        assert_eq!(tool.option_field.as_deref(), Some("target_format"));

        assert!(matches!(
            catalog.get("nope"),
            Err(CatalogError::NotFound(id)) if id == "nope"
        ));
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let tools = builtin_tools();
        let catalog = ToolCatalog::with_builtin();
        assert_eq!(catalog.len(), tools.len());
    }

    #[test]
    fn test_password_tools_use_explicit_field() {
        let catalog = ToolCatalog::with_builtin();
        for id in ["pdf-protect", "pdf-unlock"] {
            let tool = catalog.get(id).unwrap();
            assert_eq!(tool.option_field.as_deref(), Some("password"));
            assert!(tool.free_option);
        }
    }

    #[test]
    fn test_page_and_effect_tools() {
        let catalog = ToolCatalog::with_builtin();

        let split = catalog.get("pdf-split").unwrap();
        assert_eq!(split.endpoint, "/convert/pdf/split");
        assert_eq!(split.option_field.as_deref(), Some("pages"));
        assert!(split.free_option);
        assert!(split.accepts_option("1-3,5,7-9"));
        assert_eq!(split.output_extension.as_deref(), Some("pdf"));

        let rotate = catalog.get("pdf-rotate").unwrap();
        assert_eq!(rotate.option_field.as_deref(), Some("angle"));
        let angles: Vec<&str> = rotate.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(angles, vec!["90", "180", "270"]);
        assert!(!rotate.accepts_option("45"));
        assert_eq!(rotate.default_option.as_deref(), Some("90"));
        assert_eq!(rotate.output_extension.as_deref(), Some("pdf"));

        let filter = catalog.get("image-filter").unwrap();
        assert_eq!(filter.option_field.as_deref(), Some("filter_type"));
        assert_eq!(filter.options.len(), 6);
        assert!(filter.accepts_option("emboss"));
        assert_eq!(filter.output_extension.as_deref(), Some("png"));

        let exif = catalog.get("strip-exif").unwrap();
        assert!(!exif.requires_option());
        assert_eq!(exif.output_extension.as_deref(), Some("png"));

        let ocr = catalog.get("ocr-searchable-pdf").unwrap();
        assert!(ocr.accept_filter().matches("scan.TIF"));
        assert!(!ocr.accept_filter().matches("scan.gif"));
        assert_eq!(ocr.output_extension.as_deref(), Some("pdf"));
    }

    #[test]
    fn test_extend_from_overrides_and_adds() {
        let mut catalog = ToolCatalog::with_builtin();
        let before = catalog.len();

        let mut tools = BTreeMap::new();
        tools.insert(
            "image-convert".to_string(),
            ToolConfig::builder()
                .title("Images")
                .endpoint("/v2/image")
                .build(),
        );
        tools.insert(
            "heic-to-jpg".to_string(),
            ToolConfig::builder()
                .title("HEIC to JPG")
                .endpoint("/convert/heic")
                .output_extension("jpg")
                .build(),
        );

        catalog.extend_from(&tools);

        assert_eq!(catalog.len(), before + 1);
        assert_eq!(catalog.get("image-convert").unwrap().endpoint, "/v2/image");
        assert_eq!(catalog.get("heic-to-jpg").unwrap().id, "heic-to-jpg");
    }

    #[test]
    fn test_by_category_groups_tools() {
        let catalog = ToolCatalog::with_builtin();
        let groups = catalog.by_category();
        let pdf: Vec<&str> = groups["pdf"].iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            pdf,
            vec![
                "pdf-compress",
                "pdf-merge",
                "pdf-protect",
                "pdf-rotate",
                "pdf-split",
                "pdf-unlock"
            ]
        );
        assert!(groups.contains_key("media"));
    }
}
