//! Listing filter and search resolution.
//!
//! A browse or search request becomes criteria ([`BrowseCriteria`],
//! [`SearchCriteria`]), the criteria become a [`ListingFilter`], and the
//! filter narrows a listing set in a fixed precedence: category, brand,
//! model, then free text. [`sort_listings`] and [`paginate`] finish the
//! pipeline. Everything here is pure; the services decide which parts run
//! in the repository and which run in process.

mod criteria;
mod ordering;
mod resolver;

pub use criteria::{
    BrowseCriteria, SearchCriteria, SearchQuery, SearchQueryError, SearchScope, SortMode,
    UnknownSortModeError,
};
pub use ordering::{paginate, sort_listings};
pub use resolver::{ListingFilter, TextMatch, matches, resolve};
