//! Serializable page envelope.

use serde::Serialize;

use crate::request::{PageRequest, total_pages};

/// One page of results together with the totals a pager needs.
///
/// Serializes with camelCase keys:
/// `{ "items": [...], "page": 1, "pageSize": 20, "totalItems": 45, "totalPages": 3 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    page: u32,
    page_size: u32,
    total_items: u64,
    total_pages: u64,
}

impl<T> Page<T> {
    /// Wrap items that were already windowed by the backing store.
    ///
    /// `total_items` is the size of the full, unwindowed result set.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page(),
            page_size: request.page_size().get(),
            total_items,
            total_pages: total_pages(total_items, request.page_size()),
        }
    }

    /// Slice one page out of a complete, ordered result set.
    ///
    /// Requests past the last page produce an empty page with correct totals.
    #[must_use]
    pub fn from_vec(all: Vec<T>, request: PageRequest) -> Self {
        let total_items = u64::try_from(all.len()).unwrap_or(u64::MAX);
        let window = request.window();
        let skip = usize::try_from(window.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(window.limit()).unwrap_or(usize::MAX);
        let items = all.into_iter().skip(skip).take(take).collect();
        Self::new(items, request, total_items)
    }

    /// Slice one page out of a borrowed result set, cloning the page items.
    #[must_use]
    pub fn from_slice(all: &[T], request: PageRequest) -> Self
    where
        T: Clone,
    {
        Self::from_vec(all.to_vec(), request)
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Size of the full result set.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of pages in the full result set.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Whether a later page holds items.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Transform the items while keeping the totals.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
