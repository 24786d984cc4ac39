//! Page-number pagination primitives shared by storefront endpoints.
//!
//! The crate keeps pagination arithmetic out of handlers and services:
//!
//! - [`PageRequest`] validates a 1-based page number and page size and
//!   derives the [`PageWindow`] (offset and limit) for a backing store.
//! - [`Page`] is the serializable envelope returned to clients, carrying the
//!   items of one page alongside totals.
//! - [`PageRange`] computes the window of page numbers a pager control
//!   should show around the current page.
//! - [`page_link`] rewrites the `page` query parameter of a URL.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(3, 20).expect("valid request");
//! let items: Vec<u32> = (0..45).collect();
//! let page = Page::from_slice(&items, request);
//! assert_eq!(page.items(), &[40, 41, 42, 43, 44]);
//! assert_eq!(page.total_pages(), 3);
//! ```

mod link;
mod page;
mod range;
mod request;

pub use link::{PAGE_QUERY_PARAM, page_link};
pub use page::Page;
pub use range::{DEFAULT_RANGE_WIDTH, PageRange};
pub use request::{PageRequest, PageWindow, PaginationError, total_pages};
