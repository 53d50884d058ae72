//! `catalogx-admin`
//!
//! **Responsibility:** client-side orchestration of the admin product catalog.
//!
//! This crate provides:
//! - The `CatalogStore` seam to the product store (HTTP and in-memory)
//! - The `CatalogController`: the single owner of the catalog snapshot, the
//!   search query, the current page and the delete confirmation
//! - The two-step delete workflow
//! - Export delivery through a host-provided `ExportSink`
//!
//! Rendering, routing and sign-in live in the host. The host checks for a
//! session before building a controller.

pub mod config;
pub mod controller;
pub mod delete;
pub mod http_store;
pub mod memory_store;
pub mod notice;
pub mod session;
pub mod sink;
pub mod store;

pub use config::{AdminConfig, ConfigError};
pub use controller::{
    CatalogController, CatalogSummary, CatalogView, ExportFailure, TableBody, TableRow,
};
pub use delete::{DeleteError, DeleteOutcome, DeleteWorkflow};
pub use http_store::HttpCatalogStore;
pub use memory_store::InMemoryCatalogStore;
pub use notice::{Notice, NoticeLevel};
pub use session::{Session, SessionError, require_session};
pub use sink::{DirectorySink, ExportSink, MemorySink, SinkError};
pub use store::{CatalogStore, StoreError};
