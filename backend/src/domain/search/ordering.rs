//! Sort and paginate stage.

use pagination::{Page, PageRequest};

use super::criteria::SortMode;
use crate::domain::Listing;

/// Order listings in place.
///
/// The sort is stable: listings with equal keys keep their input order.
pub fn sort_listings(listings: &mut [Listing], sort: SortMode) {
    match sort {
        SortMode::Newest => listings.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        SortMode::PriceDesc => listings.sort_by(|a, b| b.price().cmp(&a.price())),
        SortMode::PriceAsc => listings.sort_by_key(Listing::price),
    }
}

/// Slice one page from a fully filtered and sorted listing set.
///
/// Pages past the end are empty; totals always describe the whole set.
pub fn paginate(listings: Vec<Listing>, page: PageRequest) -> Page<Listing> {
    Page::from_vec(listings, page)
}
