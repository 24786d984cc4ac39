//! Page link construction.

use url::Url;

/// Query parameter carrying the 1-based page number.
pub const PAGE_QUERY_PARAM: &str = "page";

/// Return `base` with its `page` query parameter set to `page`.
///
/// Other query parameters keep their order; an existing `page` parameter is
/// replaced.
///
/// ```
/// use pagination::page_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.test/listings?category=CPU&page=1&sort=priceAsc")
///     .expect("valid url");
/// let next = page_link(&base, 2);
/// assert_eq!(next.query(), Some("category=CPU&sort=priceAsc&page=2"));
/// ```
#[must_use]
pub fn page_link(base: &Url, page: u32) -> Url {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_QUERY_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut link = base.clone();
    link.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(PAGE_QUERY_PARAM, &page.to_string());
    link
}
