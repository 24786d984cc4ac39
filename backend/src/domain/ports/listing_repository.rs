//! Driven port for listing persistence.
//!
//! Adapters push down what storage expresses natively (status, category
//! equality, free-text substring match, ordering and the page window). The
//! brand and model tag rules stay in the domain resolver and run after
//! retrieval.

use async_trait::async_trait;
use pagination::PageWindow;

use crate::domain::search::{ListingFilter, TextMatch};
use crate::domain::{Listing, ListingId, ListingStatus, SortMode, UserId};

use super::port_error;

port_error! {
    /// Errors raised by listing repository adapters.
    pub enum ListingRepositoryError {
        /// Repository connection could not be established.
        Connection => "listing repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "listing repository query failed: {message}",
    }
}

/// Retrieval hints for active listings.
///
/// `window: None` asks for every matching row, which the browse flow uses
/// when the resolver must still narrow the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub text: Option<TextMatch>,
    pub sort: SortMode,
    pub window: Option<PageWindow>,
}

impl ListingQuery {
    /// The rules these hints express, as a resolver filter.
    ///
    /// In-process adapters evaluate hints through the same resolver the
    /// services use, so both adapters agree on matching.
    pub fn filter(&self) -> ListingFilter {
        ListingFilter {
            category: self.category.clone(),
            text: self.text.clone(),
            ..ListingFilter::default()
        }
    }
}

/// One retrieval result.
///
/// `total_count` counts every row matching the hints, ignoring the window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingSlice {
    pub listings: Vec<Listing>,
    pub total_count: u64,
}

/// Port for listing storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Active listings matching `query`, ordered by `query.sort` and cut to
    /// `query.window` when present.
    async fn fetch_active(&self, query: &ListingQuery)
    -> Result<ListingSlice, ListingRepositoryError>;

    /// Listing with the given id in any status.
    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError>;

    /// Listings among `ids` that still exist, in no particular order.
    async fn find_many(&self, ids: &[ListingId]) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Every listing of a seller in any status, newest first.
    async fn list_by_seller(&self, seller: &UserId) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Up to `limit` active listings in `category`, newest first, excluding
    /// `exclude`.
    async fn list_related(
        &self,
        category: &str,
        exclude: &ListingId,
        limit: u32,
    ) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Store a new listing with its images.
    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError>;

    /// Replace the editable content and image set of an existing listing.
    async fn update(&self, listing: &Listing) -> Result<(), ListingRepositoryError>;

    /// Set the status of an existing listing.
    async fn update_status(
        &self,
        id: &ListingId,
        status: ListingStatus,
    ) -> Result<(), ListingRepositoryError>;

    /// Remove a listing together with its images.
    async fn delete(&self, id: &ListingId) -> Result<(), ListingRepositoryError>;
}

/// Fixture repository with no listings that discards writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureListingRepository;

#[async_trait]
impl ListingRepository for FixtureListingRepository {
    async fn fetch_active(
        &self,
        _query: &ListingQuery,
    ) -> Result<ListingSlice, ListingRepositoryError> {
        Ok(ListingSlice::default())
    }

    async fn find_by_id(&self, _id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        Ok(None)
    }

    async fn find_many(&self, _ids: &[ListingId]) -> Result<Vec<Listing>, ListingRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_seller(
        &self,
        _seller: &UserId,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_related(
        &self,
        _category: &str,
        _exclude: &ListingId,
        _limit: u32,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _listing: &Listing) -> Result<(), ListingRepositoryError> {
        Ok(())
    }

    async fn update(&self, _listing: &Listing) -> Result<(), ListingRepositoryError> {
        Ok(())
    }

    async fn update_status(
        &self,
        _id: &ListingId,
        _status: ListingStatus,
    ) -> Result<(), ListingRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: &ListingId) -> Result<(), ListingRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::SearchScope;
    use crate::domain::listing::fixtures::ListingBuilder;
    use crate::domain::search::{SearchQuery, matches};

    #[tokio::test]
    async fn fixture_repository_is_empty() {
        let repo = FixtureListingRepository;

        let slice = repo
            .fetch_active(&ListingQuery::default())
            .await
            .expect("fixture fetch succeeds");
        assert!(slice.listings.is_empty());
        assert_eq!(slice.total_count, 0);

        let found = repo
            .find_by_id(&ListingId::random())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    fn hints_translate_to_a_filter_without_brand_or_model() {
        let hints = ListingQuery {
            category: Some("GPU".to_owned()),
            text: Some(TextMatch {
                query: SearchQuery::new("RTX").expect("query"),
                scope: SearchScope::Quick,
            }),
            ..ListingQuery::default()
        };

        let filter = hints.filter();

        assert!(filter.brand.is_none());
        assert!(filter.model.is_none());
        let gpu = ListingBuilder::new("RTX 4070").category("GPU").build();
        let cpu = ListingBuilder::new("RTX bundle").category("CPU").build();
        assert!(matches(&gpu, &filter));
        assert!(!matches(&cpu, &filter));
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = ListingRepositoryError::connection("pool closed");
        assert_eq!(
            err.to_string(),
            "listing repository connection failed: pool closed"
        );
    }
}
