//! Driving port for listing reads: browse, search, detail and seller views.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{BrowseCriteria, Error, Listing, ListingId, SearchCriteria, UserId};

/// A listing with related listings from the same category.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDetail {
    pub listing: Listing,
    pub related: Vec<Listing>,
}

/// Domain use-case port for reading listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingsQuery: Send + Sync {
    /// Active listings for a category browse selection.
    async fn browse(&self, criteria: BrowseCriteria) -> Result<Page<Listing>, Error>;

    /// Active listings matching a free-text query, newest first.
    async fn search(&self, criteria: SearchCriteria) -> Result<Page<Listing>, Error>;

    /// A listing and its related listings.
    ///
    /// Hidden listings resolve only for their seller; for anyone else they
    /// are reported as not found.
    async fn listing_detail(
        &self,
        id: ListingId,
        viewer: Option<UserId>,
    ) -> Result<ListingDetail, Error>;

    /// Every listing owned by `seller`, newest first.
    async fn seller_listings(&self, seller: &UserId) -> Result<Vec<Listing>, Error>;
}

/// Fixture query over an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureListingsQuery;

#[async_trait]
impl ListingsQuery for FixtureListingsQuery {
    async fn browse(&self, criteria: BrowseCriteria) -> Result<Page<Listing>, Error> {
        Ok(Page::new(Vec::new(), criteria.page(), 0))
    }

    async fn search(&self, criteria: SearchCriteria) -> Result<Page<Listing>, Error> {
        Ok(Page::new(Vec::new(), criteria.page(), 0))
    }

    async fn listing_detail(
        &self,
        id: ListingId,
        _viewer: Option<UserId>,
    ) -> Result<ListingDetail, Error> {
        Err(Error::not_found(format!("listing {id} not found")))
    }

    async fn seller_listings(&self, _seller: &UserId) -> Result<Vec<Listing>, Error> {
        Ok(Vec::new())
    }
}
