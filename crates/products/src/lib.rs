//! Catalog query & export logic.
//!
//! This crate contains the rules for searching, faceting, paging and
//! exporting an in-memory product catalog, implemented purely as
//! deterministic functions over borrowed records (no IO, no HTTP, no
//! download mechanism).

pub mod export;
pub mod facets;
pub mod pagination;
pub mod record;
pub mod search;

pub use export::{
    COLUMNS, CSV_MIME_TYPE, CsvExporter, ExportError, ExportOptions, ExportPayload, ExportScope,
    QuoteEscape,
};
pub use facets::category_facets;
pub use pagination::{PAGE_SIZE, Page, Paginator};
pub use record::{Price, ProductRecord};
pub use search::{SearchQuery, filter};
