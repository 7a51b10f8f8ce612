//! Course library: asset loading, course documents and the catalog.
//!
//! # Content Layout
//!
//! ```text
//! $COURSEBOOK_CONTENT/
//! ├── rust.course.yaml          # One course per document
//! ├── go.course.json
//! └── assets/
//!     └── rust/
//!         └── ownership.md      # Referenced as `kind: markdown_file`
//! ```
//!
//! Built-in courses are always listed first, in author order.

pub mod catalog;
pub mod document;
pub mod loader;

pub use catalog::{Catalog, CatalogExport, CatalogOptions, SharedCatalog, CATALOG_FORMAT_VERSION};
pub use document::{
    check_document, course_from_text, discover_documents, load_course_document, parse_document,
    resolve_assets, DocumentFormat, MARKDOWN_FILE_KIND,
};
pub use loader::{AssetLoader, EmbeddedAssets, FsAssets, LayeredAssets, MemoryAssets};
