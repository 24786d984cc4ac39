//! Visible page-number window for pager controls.

use std::ops::RangeInclusive;

/// Number of page links a pager shows at most.
pub const DEFAULT_RANGE_WIDTH: u64 = 7;

/// Pages shown before the current page when enough pages precede it.
const LEADING_PAGES: u64 = 3;

/// Inclusive window of page numbers surrounding the current page.
///
/// The window starts three pages before the current page and spans up to
/// [`DEFAULT_RANGE_WIDTH`] pages. Near the last page the start shifts back so
/// the window stays full whenever enough pages exist.
///
/// ```
/// use pagination::PageRange;
///
/// let range = PageRange::around(10, 12);
/// assert_eq!(range.pages().collect::<Vec<_>>(), vec![6, 7, 8, 9, 10, 11, 12]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: u64,
    end: u64,
}

impl PageRange {
    /// Compute the window for `current` out of `total_pages`.
    ///
    /// With no pages the window is empty.
    #[must_use]
    pub fn around(current: u32, total_pages: u64) -> Self {
        if total_pages == 0 {
            return Self { start: 1, end: 0 };
        }
        let span = DEFAULT_RANGE_WIDTH - 1;
        let anchor = u64::from(current).clamp(1, total_pages);
        let leading = anchor.saturating_sub(LEADING_PAGES).max(1);
        let end = total_pages.min(leading + span);
        let start = if end - leading < span {
            end.saturating_sub(span).max(1)
        } else {
            leading
        };
        Self { start, end }
    }

    /// First page number in the window.
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Last page number in the window.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Whether the window holds no pages.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Page numbers in the window, ascending.
    #[must_use]
    pub const fn pages(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }
}

#[cfg(test)]
mod tests {
    //! Window placement at the start, middle, and end of a result set.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 3, 1, 3)]
    #[case(1, 12, 1, 7)]
    #[case(4, 12, 1, 7)]
    #[case(6, 12, 3, 9)]
    #[case(11, 12, 6, 12)]
    #[case(12, 12, 6, 12)]
    #[case(40, 12, 6, 12)]
    fn places_window(
        #[case] current: u32,
        #[case] total: u64,
        #[case] start: u64,
        #[case] end: u64,
    ) {
        let range = PageRange::around(current, total);
        assert_eq!((range.start(), range.end()), (start, end));
    }

    #[rstest]
    fn empty_when_no_pages() {
        let range = PageRange::around(1, 0);
        assert!(range.is_empty());
        assert_eq!(range.pages().count(), 0);
    }

    #[rstest]
    fn never_wider_than_default_width() {
        for current in 1..=30 {
            let range = PageRange::around(current, 30);
            assert_eq!(range.pages().count(), 7);
            assert!(range.pages().contains(&u64::from(current)));
        }
    }
}
