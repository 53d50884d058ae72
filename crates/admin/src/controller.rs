//! Catalog controller: the single owner of admin catalog state.
//!
//! The controller holds the last fetched snapshot, the search query, the
//! current page and the delete candidate. Everything shown to the user
//! (filtered rows, facets, page, export) is recomputed from that state on
//! demand; nothing derived is cached.
//!
//! Operations that await the store take `&mut self`, so a controller never
//! has two fetches or two deletes outstanding at once.

use std::collections::HashSet;

use chrono::NaiveDate;
use thiserror::Error;

use catalogx_core::ProductId;
use catalogx_products::{
    CsvExporter, ExportError, ExportPayload, ExportScope, Paginator, ProductRecord, SearchQuery,
    category_facets,
};

use crate::config::{AdminConfig, ConfigError};
use crate::delete::{DeleteError, DeleteOutcome, DeleteWorkflow};
use crate::notice::{self, Notice};
use crate::session::Session;
use crate::sink::{ExportSink, SinkError};
use crate::store::{CatalogStore, StoreError};

/// Why an export produced no file.
#[derive(Debug, Error)]
pub enum ExportFailure {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Counts behind "Total Products" / "N products found".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSummary {
    pub total: usize,
    pub matched: usize,
    pub search_active: bool,
}

/// One visible table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow<'a> {
    /// Position in the filtered sequence, 1-based, continuous across pages.
    pub serial: usize,
    pub record: &'a ProductRecord,
    /// First image, or the configured fallback asset.
    pub thumbnail: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<'a> {
    /// A fetch is outstanding; show a busy indicator instead of rows.
    Busy,
    /// Nothing to show, with the message to display.
    Empty(&'static str),
    Rows(Vec<TableRow<'a>>),
}

/// Everything the rendering layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView<'a> {
    pub body: TableBody<'a>,
    pub page: usize,
    pub total_pages: usize,
    pub show_pagination: bool,
    pub has_previous: bool,
    pub has_next: bool,
    pub summary: CatalogSummary,
    pub facets: Vec<String>,
    pub export_label: &'static str,
    pub delete_prompt: Option<String>,
}

pub struct CatalogController<S> {
    store: S,
    session: Session,
    paginator: Paginator,
    exporter: CsvExporter,
    catalogue_document: String,
    fallback_thumbnail: String,

    catalog: Vec<ProductRecord>,
    query: String,
    page: usize,
    loading: bool,
    delete: DeleteWorkflow,
    notices: Vec<Notice>,
}

impl<S> core::fmt::Debug for CatalogController<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CatalogController")
            .field("session", &self.session)
            .field("catalog_len", &self.catalog.len())
            .field("query", &self.query)
            .field("page", &self.page)
            .field("loading", &self.loading)
            .field("delete", &self.delete)
            .finish_non_exhaustive()
    }
}

impl<S: CatalogStore> CatalogController<S> {
    /// Build a controller with an empty catalog.
    ///
    /// The caller must already hold a [`Session`]; see
    /// [`require_session`](crate::session::require_session).
    pub fn new(store: S, session: Session, config: &AdminConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            store,
            session,
            paginator: config.paginator()?,
            exporter: CsvExporter::new(config.export.clone()),
            catalogue_document: config.catalogue_document.clone(),
            fallback_thumbnail: config.fallback_thumbnail.clone(),
            catalog: Vec::new(),
            query: String::new(),
            page: 1,
            loading: false,
            delete: DeleteWorkflow::new(),
            notices: Vec::new(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &[ProductRecord] {
        &self.catalog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn catalogue_document(&self) -> &str {
        &self.catalogue_document
    }

    // ── fetch ───────────────────────────────────────────────────────────

    /// Mark a fetch as outstanding. Returns `false` if one already is.
    pub fn begin_fetch(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Apply the outcome of the outstanding fetch.
    ///
    /// Success replaces the catalog wholesale. Failure empties it rather
    /// than leaving stale rows, and queues a notice.
    pub fn complete_fetch(&mut self, result: Result<Vec<ProductRecord>, StoreError>) {
        self.loading = false;
        match result {
            Ok(records) => {
                self.catalog = dedupe_by_id(records);
                tracing::info!(count = self.catalog.len(), "catalog fetched");
            }
            Err(err) => {
                tracing::error!(error = %err, "catalog fetch failed");
                self.catalog.clear();
                self.notices
                    .push(Notice::error(err.user_message(notice::FETCH_FAILED)));
            }
        }
        self.clamp_page();
    }

    /// Fetch the catalog from the store and replace the snapshot.
    pub async fn refresh(&mut self) -> Result<usize, StoreError> {
        if !self.begin_fetch() {
            return Ok(self.catalog.len());
        }
        let result = self.store.list_products().await;
        let failure = result.as_ref().err().cloned();
        self.complete_fetch(result);
        match failure {
            Some(err) => Err(err),
            None => Ok(self.catalog.len()),
        }
    }

    /// Drop the snapshot; the next view shows an empty catalog until a fetch lands.
    pub fn invalidate(&mut self) {
        self.catalog.clear();
        self.page = 1;
    }

    // ── search & facets ─────────────────────────────────────────────────

    /// Replace the query. Always returns to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn clear_search(&mut self) {
        self.set_query(String::new());
    }

    /// Search for exactly `category`.
    pub fn select_facet(&mut self, category: &str) {
        self.set_query(category);
    }

    pub fn filtered(&self) -> Vec<&ProductRecord> {
        SearchQuery::parse(&self.query).apply(&self.catalog)
    }

    /// Facets over the full catalog, independent of the query.
    pub fn facets(&self) -> Vec<String> {
        category_facets(&self.catalog)
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            total: self.catalog.len(),
            matched: self.filtered().len(),
            search_active: !self.query.is_empty(),
        }
    }

    // ── pagination ──────────────────────────────────────────────────────

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.filtered().len())
    }

    pub fn next_page(&mut self) {
        self.page = self.paginator.next(self.page, self.filtered().len());
    }

    pub fn previous_page(&mut self) {
        self.page = self.paginator.previous(self.page, self.filtered().len());
    }

    /// Jump to `page`, clamped into range.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = self.paginator.clamp(page, self.filtered().len());
    }

    fn clamp_page(&mut self) {
        self.page = self.paginator.clamp(self.page, self.filtered().len());
    }

    /// Rows of the current page.
    pub fn visible_rows(&self) -> Vec<TableRow<'_>> {
        let filtered = self.filtered();
        let page = self.paginator.page(&filtered, self.page);
        page.rows()
            .map(|(serial, record)| {
                let record: &ProductRecord = *record;
                TableRow {
                    serial,
                    record,
                    thumbnail: record
                        .thumbnail()
                        .unwrap_or(self.fallback_thumbnail.as_str()),
                }
            })
            .collect()
    }

    pub fn view(&self) -> CatalogView<'_> {
        let summary = self.summary();
        let total_pages = self.paginator.total_pages(summary.matched);

        let body = if self.loading {
            TableBody::Busy
        } else {
            let rows = self.visible_rows();
            if rows.is_empty() {
                TableBody::Empty(if summary.search_active {
                    notice::NO_SEARCH_RESULTS
                } else {
                    notice::NO_PRODUCTS
                })
            } else {
                TableBody::Rows(rows)
            }
        };

        CatalogView {
            body,
            page: self.page,
            total_pages,
            show_pagination: self.paginator.shows_controls(summary.matched),
            has_previous: self.page > 1,
            has_next: self.page < total_pages,
            summary,
            facets: self.facets(),
            export_label: self.export_label(),
            delete_prompt: self.delete.prompt(),
        }
    }

    // ── export ──────────────────────────────────────────────────────────

    pub fn export_scope(&self) -> ExportScope {
        ExportScope::from_query(&self.query)
    }

    pub fn export_label(&self) -> &'static str {
        match self.export_scope() {
            ExportScope::All => "Export All Products",
            ExportScope::Filtered => "Export Filtered Products",
        }
    }

    /// CSV payload of the filtered sequence, without delivering it.
    pub fn export_payload(&self, today: NaiveDate) -> Result<ExportPayload, ExportError> {
        self.exporter
            .export(self.filtered(), self.export_scope(), today)
    }

    /// Export the filtered sequence and hand it to `sink`.
    ///
    /// An empty filtered sequence produces no file and a distinct notice.
    pub fn export<K>(&mut self, sink: &K, today: NaiveDate) -> Result<ExportPayload, ExportFailure>
    where
        K: ExportSink + ?Sized,
    {
        let payload = match self.export_payload(today) {
            Ok(payload) => payload,
            Err(ExportError::NothingToExport) => {
                tracing::info!("export skipped: no matching products");
                self.notices.push(Notice::error(notice::NOTHING_TO_EXPORT));
                return Err(ExportError::NothingToExport.into());
            }
            Err(err) => {
                tracing::error!(error = %err, "export serialization failed");
                self.notices.push(Notice::error(notice::EXPORT_FAILED));
                return Err(err.into());
            }
        };

        if let Err(err) = sink.deliver(payload.as_bytes(), &payload.filename, payload.mime_type) {
            tracing::error!(error = %err, filename = %payload.filename, "export delivery failed");
            self.notices.push(Notice::error(notice::EXPORT_FAILED));
            return Err(err.into());
        }

        tracing::info!(rows = payload.row_count, filename = %payload.filename, "export delivered");
        self.notices
            .push(Notice::success(notice::exported(payload.row_count)));
        Ok(payload)
    }

    // ── delete ──────────────────────────────────────────────────────────

    pub fn pending_delete(&self) -> Option<&ProductRecord> {
        self.delete.pending()
    }

    pub fn delete_prompt(&self) -> Option<String> {
        self.delete.prompt()
    }

    /// Propose the record with `id` from the current snapshot for deletion.
    pub fn request_delete(&mut self, id: &ProductId) -> Result<(), DeleteError> {
        let record = self
            .catalog
            .iter()
            .find(|record| &record.id == id)
            .cloned()
            .ok_or_else(|| DeleteError::NotFound(id.clone()))?;
        self.delete.request(record)
    }

    pub fn cancel_delete(&mut self) -> Option<ProductRecord> {
        self.delete.cancel()
    }

    /// Send the confirmed delete and react to the answer.
    ///
    /// Success discards the snapshot and fetches it again; the record is
    /// never removed locally. Failure leaves the catalog as it was.
    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let outcome = self.delete.confirm(&self.store).await;
        match &outcome {
            DeleteOutcome::Deleted(_) => {
                self.notices.push(Notice::success(notice::DELETE_SUCCEEDED));
                self.invalidate();
                // A failed re-fetch queues its own notice.
                let _ = self.refresh().await;
            }
            DeleteOutcome::Failed { message, .. } => {
                self.notices.push(Notice::error(message.clone()));
            }
            DeleteOutcome::NothingPending => {}
        }
        outcome
    }

    // ── notices ─────────────────────────────────────────────────────────

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hand queued notices to the host, leaving the queue empty.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

/// Keep the first record for each id.
fn dedupe_by_id(records: Vec<ProductRecord>) -> Vec<ProductRecord> {
    if catalogx_core::ensure_unique_ids(&records).is_ok() {
        return records;
    }

    let before = records.len();
    let mut seen = HashSet::new();
    let unique: Vec<ProductRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect();
    tracing::warn!(dropped = before - unique.len(), "catalog contained duplicate ids");
    unique
}
