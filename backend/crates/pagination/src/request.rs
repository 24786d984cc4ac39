//! Page request validation and window arithmetic.

use std::num::NonZeroU32;

/// Errors raised when a page request cannot be honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page numbers are 1-based; zero does not address a page.
    #[error("page number must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// A validated request for one page of results.
///
/// Page numbers are 1-based. The request never clamps against the number of
/// available pages: asking for a page past the end is valid and yields an
/// empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: NonZeroU32,
    page_size: NonZeroU32,
}

impl PageRequest {
    /// Build a request from raw page number and size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPage`] when `page` is zero and
    /// [`PaginationError::ZeroPageSize`] when `page_size` is zero.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PaginationError> {
        let Some(number) = NonZeroU32::new(page) else {
            return Err(PaginationError::ZeroPage);
        };
        let Some(size) = NonZeroU32::new(page_size) else {
            return Err(PaginationError::ZeroPageSize);
        };
        Ok(Self {
            page: number,
            page_size: size,
        })
    }

    /// The first page with the given size.
    #[must_use]
    pub const fn first(page_size: NonZeroU32) -> Self {
        Self {
            page: NonZeroU32::MIN,
            page_size,
        }
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page.get()
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn page_size(self) -> NonZeroU32 {
        self.page_size
    }

    /// Offset and limit addressing this page in an ordered result set.
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let window = PageRequest::new(2, 20).expect("valid").window();
    /// assert_eq!(window.offset(), 20);
    /// assert_eq!(window.limit(), 20);
    /// ```
    #[must_use]
    pub fn window(self) -> PageWindow {
        let preceding = u64::from(self.page.get() - 1);
        PageWindow {
            offset: preceding * u64::from(self.page_size.get()),
            limit: self.page_size.get(),
        }
    }
}

/// Offset/limit pair derived from a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: u64,
    limit: u32,
}

impl PageWindow {
    /// Number of items skipped before the page starts.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }
}

/// Number of pages needed to show `total_items` items, `ceil(N / S)`.
///
/// An empty result set has zero pages.
///
/// ```
/// use std::num::NonZeroU32;
/// use pagination::total_pages;
///
/// let size = NonZeroU32::new(20).expect("non-zero");
/// assert_eq!(total_pages(45, size), 3);
/// assert_eq!(total_pages(40, size), 2);
/// assert_eq!(total_pages(0, size), 0);
/// ```
#[must_use]
pub fn total_pages(total_items: u64, page_size: NonZeroU32) -> u64 {
    total_items.div_ceil(u64::from(page_size.get()))
}

#[cfg(test)]
mod tests {
    //! Validation and window arithmetic coverage.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 20, PaginationError::ZeroPage)]
    #[case(1, 0, PaginationError::ZeroPageSize)]
    #[case(0, 0, PaginationError::ZeroPage)]
    fn rejects_zero_values(#[case] page: u32, #[case] size: u32, #[case] expected: PaginationError) {
        assert_eq!(PageRequest::new(page, size), Err(expected));
    }

    #[rstest]
    #[case(1, 20, 0)]
    #[case(2, 20, 20)]
    #[case(3, 20, 40)]
    #[case(4, 20, 60)]
    fn window_offset_is_preceding_pages_times_size(
        #[case] page: u32,
        #[case] size: u32,
        #[case] offset: u64,
    ) {
        let Ok(request) = PageRequest::new(page, size) else {
            panic!("request should be valid");
        };
        let window = request.window();
        assert_eq!(window.offset(), offset);
        assert_eq!(window.limit(), size);
    }

    #[rstest]
    fn window_offset_does_not_overflow_for_large_pages() {
        let Ok(request) = PageRequest::new(u32::MAX, u32::MAX) else {
            panic!("request should be valid");
        };
        let expected = u64::from(u32::MAX - 1) * u64::from(u32::MAX);
        assert_eq!(request.window().offset(), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(20, 1)]
    #[case(21, 2)]
    #[case(45, 3)]
    fn total_pages_rounds_up(#[case] items: u64, #[case] expected: u64) {
        assert_eq!(total_pages(items, NonZeroU32::new(20).unwrap_or(NonZeroU32::MIN)), expected);
    }
}
