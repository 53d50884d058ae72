//! Fixed-size, 1-based pagination over a filtered sequence.

use catalogx_core::DomainError;

/// Rows per page in the admin catalog table.
pub const PAGE_SIZE: usize = 9;

/// Page arithmetic for a fixed page size.
///
/// Page numbers are 1-based. Slicing never fails: a page outside the
/// sequence yields an empty slice. Navigation clamps to `[1, total_pages]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
        }
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Result<Self, DomainError> {
        if page_size == 0 {
            return Err(DomainError::validation("page size must be at least 1"));
        }
        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(len / page_size)`; zero for an empty sequence.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Pagination controls are only worth showing past a single page.
    pub fn shows_controls(&self, len: usize) -> bool {
        self.total_pages(len) > 1
    }

    /// Items `[(page-1)*size, page*size)` clamped to the sequence bounds.
    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        if page == 0 {
            return &[];
        }
        let start = (page - 1).saturating_mul(self.page_size).min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// Bring `page` into `[1, total_pages]`. An empty sequence keeps page 1.
    pub fn clamp(&self, page: usize, len: usize) -> usize {
        page.clamp(1, self.total_pages(len).max(1))
    }

    /// Next page, or `page` itself on the last one.
    pub fn next(&self, page: usize, len: usize) -> usize {
        self.clamp(page.saturating_add(1), len)
    }

    /// Previous page, or `page` itself on the first one.
    pub fn previous(&self, page: usize, len: usize) -> usize {
        self.clamp(page.saturating_sub(1), len)
    }

    /// 1-based serial number of the first row on `page`.
    pub fn first_serial(&self, page: usize) -> usize {
        page.saturating_sub(1)
            .saturating_mul(self.page_size)
            .saturating_add(1)
    }

    /// Build the page view for `page` over `items`.
    pub fn page<'a, T>(&self, items: &'a [T], page: usize) -> Page<'a, T> {
        Page {
            items: self.slice(items, page),
            number: page,
            total_pages: self.total_pages(items.len()),
            first_serial: self.first_serial(page),
        }
    }
}

/// One visible page of a sequence.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub total_pages: usize,
    first_serial: usize,
}

impl<T> Clone for Page<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Page<'_, T> {}

impl<'a, T> Page<'a, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Rows paired with their serial number, continuing across pages.
    pub fn rows(self) -> impl Iterator<Item = (usize, &'a T)> {
        let first = self.first_serial;
        self.items
            .iter()
            .enumerate()
            .map(move |(index, item)| (first + index, item))
    }
}
