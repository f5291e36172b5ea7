//! Tool catalog
//!
//! A tool is one conversion capability bound to a fixed backend endpoint.
//! Tools are pure configuration: one [`ToolConfig`] drives a generic widget
//! instead of a hand-written widget per tool.
//!
//! ## Key Components
//!
//! - [`ToolConfig`] - Endpoint, accepted types, option set and output extension
//! - [`ToolCatalog`] - Registry of tools keyed by id
//! - [`AcceptFilter`] - File type filter applied when files are selected
//!
//! ## Example
//!
//! ```rust,ignore
//! use convbox::tools::ToolCatalog;
//!
//! let catalog = ToolCatalog::with_builtin();
//! let tool = catalog.get("image-convert")?;
//! assert_eq!(tool.option_field.as_deref(), Some("target_format"));
//! ```

mod accept;
mod catalog;
mod types;

pub use accept::{AcceptFilter, mime_for_extension};
pub use catalog::{CatalogError, ToolCatalog, builtin_tools};
pub use types::{ConversionOption, InputKind, ToolConfig};
