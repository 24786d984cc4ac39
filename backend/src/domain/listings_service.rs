//! Listing domain services.
//!
//! [`ListingsService`] implements the browse, search, detail and seller
//! mutation ports on top of a [`ListingRepository`]. Browse requests that
//! select a brand fetch the whole category and run the resolver,
//! sort and paginate stages in process; every other read pushes ordering and
//! the page window down to the repository.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    ListingDetail, ListingQuery, ListingRepository, ListingRepositoryError, ListingSlice,
    ListingsCommand, ListingsQuery,
};
use crate::domain::search::{paginate, resolve, sort_listings};
use crate::domain::{
    BrowseCriteria, Error, Listing, ListingContent, ListingDraft, ListingId, ListingStatus,
    ListingValidationError, SearchCriteria, SortMode, UserId,
};

/// Number of related listings shown beside a listing by default.
pub const DEFAULT_RELATED_LIMIT: u32 = 5;

fn map_repository_error(error: ListingRepositoryError) -> Error {
    match error {
        ListingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("listing repository unavailable: {message}"))
        }
        ListingRepositoryError::Query { message } => {
            Error::internal(format!("listing repository error: {message}"))
        }
    }
}

fn map_validation_error(error: ListingValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": "invalid_listing",
    }))
}

fn listing_not_found(id: &ListingId) -> Error {
    Error::not_found(format!("listing {id} not found"))
}

/// Listing service implementing the listing query and command ports.
#[derive(Clone)]
pub struct ListingsService<R> {
    listings: Arc<R>,
    clock: Arc<dyn Clock>,
    related_limit: u32,
}

impl<R> ListingsService<R> {
    /// Create a service over `listings`, stamping new listings with `clock`.
    pub fn new(listings: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            listings,
            clock,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }

    /// Override how many related listings a detail view carries.
    #[must_use]
    pub fn with_related_limit(mut self, limit: u32) -> Self {
        self.related_limit = limit;
        self
    }
}

impl<R> ListingsService<R>
where
    R: ListingRepository,
{
    async fn fetch(&self, query: &ListingQuery) -> Result<ListingSlice, Error> {
        self.listings.fetch_active(query).await.map_err(|err| {
            warn!(error = %err, "active listing fetch failed");
            map_repository_error(err)
        })
    }

    async fn find(&self, id: &ListingId) -> Result<Listing, Error> {
        self.listings
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| listing_not_found(id))
    }

    async fn owned_listing(&self, seller: &UserId, id: &ListingId) -> Result<Listing, Error> {
        let listing = self.find(id).await?;
        if !listing.is_owned_by(seller) {
            warn!(listing_id = %id, user_id = %seller, "listing mutation by non-owner");
            return Err(Error::forbidden("listing belongs to another seller"));
        }
        Ok(listing)
    }
}

#[async_trait]
impl<R> ListingsQuery for ListingsService<R>
where
    R: ListingRepository,
{
    async fn browse(&self, criteria: BrowseCriteria) -> Result<Page<Listing>, Error> {
        let page = criteria.page();
        let mut query = ListingQuery {
            category: criteria.category().map(str::to_owned),
            text: None,
            sort: criteria.sort(),
            window: None,
        };

        if !criteria.needs_in_process_filter() {
            query.window = Some(page.window());
            let slice = self.fetch(&query).await?;
            return Ok(Page::new(slice.listings, page, slice.total_count));
        }

        let slice = self.fetch(&query).await?;
        let fetched = slice.listings.len();
        let mut listings = resolve(slice.listings, &criteria.filter());
        sort_listings(&mut listings, criteria.sort());
        debug!(
            fetched,
            matched = listings.len(),
            brand = criteria.brand(),
            model = criteria.model(),
            "resolved brand/model selection in process"
        );
        Ok(paginate(listings, page))
    }

    async fn search(&self, criteria: SearchCriteria) -> Result<Page<Listing>, Error> {
        let page = criteria.page();
        let query = ListingQuery {
            category: None,
            text: Some(criteria.text_match()),
            sort: SortMode::Newest,
            window: Some(page.window()),
        };
        let slice = self.fetch(&query).await?;
        Ok(Page::new(slice.listings, page, slice.total_count))
    }

    async fn listing_detail(
        &self,
        id: ListingId,
        viewer: Option<UserId>,
    ) -> Result<ListingDetail, Error> {
        let listing = self.find(&id).await?;
        if !listing.is_visible_to(viewer.as_ref()) {
            return Err(listing_not_found(&id));
        }

        let related = self
            .listings
            .list_related(listing.category(), &id, self.related_limit)
            .await
            .map_err(map_repository_error)?;
        Ok(ListingDetail { listing, related })
    }

    async fn seller_listings(&self, seller: &UserId) -> Result<Vec<Listing>, Error> {
        self.listings
            .list_by_seller(seller)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> ListingsCommand for ListingsService<R>
where
    R: ListingRepository,
{
    async fn create(&self, seller: &UserId, draft: ListingDraft) -> Result<Listing, Error> {
        let content = ListingContent::new(draft).map_err(map_validation_error)?;
        let listing = Listing::publish(
            ListingId::random(),
            seller.clone(),
            content,
            self.clock.utc(),
        );

        self.listings
            .insert(&listing)
            .await
            .map_err(map_repository_error)?;
        info!(listing_id = %listing.id(), user_id = %seller, category = listing.category(), "listing created");
        Ok(listing)
    }

    async fn update(
        &self,
        seller: &UserId,
        id: ListingId,
        draft: ListingDraft,
    ) -> Result<Listing, Error> {
        let mut listing = self.owned_listing(seller, &id).await?;
        let content = ListingContent::new(draft).map_err(map_validation_error)?;
        listing.revise(content);

        self.listings
            .update(&listing)
            .await
            .map_err(map_repository_error)?;
        info!(listing_id = %id, user_id = %seller, "listing updated");
        Ok(listing)
    }

    async fn change_status(
        &self,
        seller: &UserId,
        id: ListingId,
        status: ListingStatus,
    ) -> Result<Listing, Error> {
        let mut listing = self.owned_listing(seller, &id).await?;
        let previous = listing.status();
        listing.set_status(status);

        self.listings
            .update_status(&id, status)
            .await
            .map_err(map_repository_error)?;
        info!(
            listing_id = %id,
            from = previous.as_str(),
            to = status.as_str(),
            "listing status changed"
        );
        Ok(listing)
    }

    async fn delete(&self, seller: &UserId, id: ListingId) -> Result<(), Error> {
        self.owned_listing(seller, &id).await?;
        self.listings
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        info!(listing_id = %id, user_id = %seller, "listing deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "listings_service_tests.rs"]
mod tests;
