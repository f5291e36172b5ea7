use bon::Builder;
use serde::{Deserialize, Serialize};

use super::accept::AcceptFilter;

/// How a tool receives its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// One or more local files sent as multipart file parts
    #[default]
    File,
    /// A remote URL sent as the `url` text field
    Url,
}

/// One entry of a tool's discrete option set
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConversionOption {
    pub value: String,
    pub label: String,
}

impl ConversionOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Static descriptor for one conversion tool
///
/// Tools are immutable once loaded. Everything a widget needs to know about
/// the backend contract lives here, including the explicit name of the form
/// field that carries the chosen option.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Builder)]
pub struct ToolConfig {
    /// Catalog key; filled from the table name when loaded from TOML
    #[serde(default)]
    #[builder(into, default)]
    pub id: String,
    #[builder(into)]
    pub title: String,
    #[serde(default)]
    #[builder(into, default)]
    pub description: String,
    #[serde(default = "default_category")]
    #[builder(into, default = default_category())]
    pub category: String,
    /// Path appended to the API base URL, e.g. `/convert/image`
    #[builder(into)]
    pub endpoint: String,
    #[serde(default)]
    #[builder(default)]
    pub input: InputKind,
    /// Accepted file types in `<input accept>` syntax; empty accepts everything
    #[serde(default)]
    #[builder(into, default)]
    pub accept: String,
    /// Send every selected file as a repeated `files` part
    #[serde(default)]
    #[builder(default)]
    pub multiple: bool,
    #[serde(default)]
    #[builder(default)]
    pub options: Vec<ConversionOption>,
    #[builder(into)]
    pub default_option: Option<String>,
    #[serde(default = "default_option_label")]
    #[builder(into, default = default_option_label())]
    pub option_label: String,
    /// Multipart field name for the chosen option (`target_format`, `password`, ...)
    #[builder(into)]
    pub option_field: Option<String>,
    /// Accept any non-empty option value instead of one of `options`
    #[serde(default)]
    #[builder(default)]
    pub free_option: bool,
    #[builder(into)]
    pub output_extension: Option<String>,
}

fn default_category() -> String {
    "general".to_string()
}

fn default_option_label() -> String {
    "Select Format".to_string()
}

impl ToolConfig {
    /// Whether a value must be chosen before submission
    pub fn requires_option(&self) -> bool {
        !self.options.is_empty() || self.free_option
    }

    pub fn option(&self, value: &str) -> Option<&ConversionOption> {
        self.options.iter().find(|opt| opt.value == value)
    }

    pub fn accepts_option(&self, value: &str) -> bool {
        if self.free_option {
            !value.is_empty()
        } else {
            self.option(value).is_some()
        }
    }

    /// Multipart field carrying uploaded files
    pub fn file_field(&self) -> &'static str {
        if self.multiple { "files" } else { "file" }
    }

    pub fn accept_filter(&self) -> AcceptFilter {
        AcceptFilter::parse(&self.accept)
    }

    pub fn is_url_tool(&self) -> bool {
        self.input == InputKind::Url
    }
}
