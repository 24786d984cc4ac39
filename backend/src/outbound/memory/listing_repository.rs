//! In-memory implementation of [`ListingRepository`].

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::InMemoryFavoriteRepository;
use crate::domain::ports::{ListingQuery, ListingRepository, ListingRepositoryError, ListingSlice};
use crate::domain::search::{matches, sort_listings};
use crate::domain::{Listing, ListingId, ListingStatus, SortMode, UserId};

/// Listing store kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryListingRepository {
    listings: RwLock<Vec<Listing>>,
    favorites: InMemoryFavoriteRepository,
}

impl InMemoryListingRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `listings`.
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings: RwLock::new(listings),
            favorites: InMemoryFavoriteRepository::new(),
        }
    }

    /// Favorite store whose rows go away with the listings they point at.
    pub fn favorites(&self) -> InMemoryFavoriteRepository {
        self.favorites.clone()
    }
}

fn not_found(id: &ListingId) -> ListingRepositoryError {
    ListingRepositoryError::query(format!("listing {id} does not exist"))
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn fetch_active(
        &self,
        query: &ListingQuery,
    ) -> Result<ListingSlice, ListingRepositoryError> {
        let filter = query.filter();
        let mut listings: Vec<Listing> = self
            .listings
            .read()
            .await
            .iter()
            .filter(|listing| listing.status() == ListingStatus::Active)
            .filter(|listing| matches(listing, &filter))
            .cloned()
            .collect();
        sort_listings(&mut listings, query.sort);

        let total_count = u64::try_from(listings.len()).unwrap_or(u64::MAX);
        if let Some(window) = query.window {
            listings = listings
                .into_iter()
                .skip(to_usize(window.offset()))
                .take(to_usize(u64::from(window.limit())))
                .collect();
        }
        Ok(ListingSlice {
            listings,
            total_count,
        })
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        Ok(self
            .listings
            .read()
            .await
            .iter()
            .find(|listing| listing.id() == *id)
            .cloned())
    }

    async fn find_many(&self, ids: &[ListingId]) -> Result<Vec<Listing>, ListingRepositoryError> {
        Ok(self
            .listings
            .read()
            .await
            .iter()
            .filter(|listing| ids.contains(&listing.id()))
            .cloned()
            .collect())
    }

    async fn list_by_seller(&self, seller: &UserId) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut listings: Vec<Listing> = self
            .listings
            .read()
            .await
            .iter()
            .filter(|listing| listing.is_owned_by(seller))
            .cloned()
            .collect();
        sort_listings(&mut listings, SortMode::Newest);
        Ok(listings)
    }

    async fn list_related(
        &self,
        category: &str,
        exclude: &ListingId,
        limit: u32,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut listings: Vec<Listing> = self
            .listings
            .read()
            .await
            .iter()
            .filter(|listing| {
                listing.status() == ListingStatus::Active
                    && listing.category() == category
                    && listing.id() != *exclude
            })
            .cloned()
            .collect();
        sort_listings(&mut listings, SortMode::Newest);
        listings.truncate(to_usize(u64::from(limit)));
        Ok(listings)
    }

    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        let mut listings = self.listings.write().await;
        if listings.iter().any(|existing| existing.id() == listing.id()) {
            return Err(ListingRepositoryError::query(format!(
                "listing {} already exists",
                listing.id()
            )));
        }
        listings.push(listing.clone());
        Ok(())
    }

    async fn update(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        let mut listings = self.listings.write().await;
        let slot = listings
            .iter_mut()
            .find(|existing| existing.id() == listing.id())
            .ok_or_else(|| not_found(&listing.id()))?;
        *slot = listing.clone();
        Ok(())
    }

    async fn update_status(
        &self,
        id: &ListingId,
        status: ListingStatus,
    ) -> Result<(), ListingRepositoryError> {
        let mut listings = self.listings.write().await;
        let slot = listings
            .iter_mut()
            .find(|existing| existing.id() == *id)
            .ok_or_else(|| not_found(id))?;
        slot.set_status(status);
        Ok(())
    }

    async fn delete(&self, id: &ListingId) -> Result<(), ListingRepositoryError> {
        self.listings
            .write()
            .await
            .retain(|listing| listing.id() != *id);
        self.favorites.forget_listing(id).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pagination::PageRequest;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::listing::fixtures::{ListingBuilder, seller};
    use crate::domain::ports::FavoriteRepository;
    use crate::domain::search::TextMatch;
    use crate::domain::{SearchQuery, SearchScope};

    #[fixture]
    fn catalogue() -> Vec<Listing> {
        vec![
            ListingBuilder::new("Ryzen 5 5600")
                .tags(&["Ryzen 5"])
                .price(15_000)
                .created_minutes(1)
                .build(),
            ListingBuilder::new("RTX 3060")
                .category("GPU")
                .price(30_000)
                .created_minutes(2)
                .build(),
            ListingBuilder::new("Sold Ryzen 7")
                .status(ListingStatus::Sold)
                .created_minutes(3)
                .build(),
            ListingBuilder::new("Core i7")
                .description("Ryzen beater")
                .price(40_000)
                .created_minutes(4)
                .build(),
        ]
    }

    fn titles(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(Listing::title).collect()
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_active_filters_by_category_and_status(catalogue: Vec<Listing>) {
        let repo = InMemoryListingRepository::with_listings(catalogue);
        let query = ListingQuery {
            category: Some("CPU".to_owned()),
            ..ListingQuery::default()
        };

        let slice = repo.fetch_active(&query).await.expect("fetch");

        assert_eq!(titles(&slice.listings), vec!["Core i7", "Ryzen 5 5600"]);
        assert_eq!(slice.total_count, 2);
    }

    #[rstest]
    #[case(SearchScope::Quick, vec!["Ryzen 5 5600"])]
    #[case(SearchScope::Full, vec!["Core i7", "Ryzen 5 5600"])]
    #[tokio::test]
    async fn fetch_active_applies_text_scope(
        catalogue: Vec<Listing>,
        #[case] scope: SearchScope,
        #[case] expected: Vec<&str>,
    ) {
        let repo = InMemoryListingRepository::with_listings(catalogue);
        let query = ListingQuery {
            text: Some(TextMatch {
                query: SearchQuery::new("ryzen").expect("query"),
                scope,
            }),
            ..ListingQuery::default()
        };

        let slice = repo.fetch_active(&query).await.expect("fetch");
        assert_eq!(titles(&slice.listings), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn window_cuts_items_but_not_the_total(catalogue: Vec<Listing>) {
        let repo = InMemoryListingRepository::with_listings(catalogue);
        let request = PageRequest::new(2, 2).expect("valid request");
        let query = ListingQuery {
            sort: SortMode::PriceAsc,
            window: Some(request.window()),
            ..ListingQuery::default()
        };

        let slice = repo.fetch_active(&query).await.expect("fetch");

        assert_eq!(titles(&slice.listings), vec!["Core i7"]);
        assert_eq!(slice.total_count, 3);
    }

    #[rstest]
    #[tokio::test]
    async fn related_excludes_the_listing_itself(catalogue: Vec<Listing>) {
        let anchor = catalogue
            .first()
            .map(Listing::id)
            .expect("catalogue has listings");
        let repo = InMemoryListingRepository::with_listings(catalogue);

        let related = repo.list_related("CPU", &anchor, 5).await.expect("related");
        assert_eq!(titles(&related), vec!["Core i7"]);
    }

    #[rstest]
    #[tokio::test]
    async fn seller_listings_include_every_status(catalogue: Vec<Listing>) {
        let repo = InMemoryListingRepository::with_listings(catalogue);
        let listings = repo.list_by_seller(&seller()).await.expect("list");
        assert_eq!(listings.len(), 4);
        assert_eq!(listings.first().map(Listing::title), Some("Core i7"));
    }

    #[tokio::test]
    async fn status_changes_and_deletes_are_visible() {
        let listing = ListingBuilder::new("PSU 750W").category("電源").build();
        let id = listing.id();
        let repo = InMemoryListingRepository::new();
        repo.insert(&listing).await.expect("insert");

        repo.update_status(&id, ListingStatus::Hidden)
            .await
            .expect("status");
        let hidden = repo.find_by_id(&id).await.expect("lookup");
        assert_eq!(hidden.map(|l| l.status()), Some(ListingStatus::Hidden));

        repo.delete(&id).await.expect("delete");
        assert!(repo.find_by_id(&id).await.expect("lookup").is_none());
    }

    #[tokio::test]
    async fn deleting_a_listing_drops_its_favorites() {
        let doomed = ListingBuilder::new("Old case fan").build();
        let kept = ListingBuilder::new("New case fan").build();
        let repo = InMemoryListingRepository::with_listings(vec![doomed.clone(), kept.clone()]);
        let favorites = repo.favorites();
        let shopper = UserId::random();
        favorites.insert(&shopper, &doomed.id()).await.expect("favorite");
        favorites.insert(&shopper, &kept.id()).await.expect("favorite");

        repo.delete(&doomed.id()).await.expect("delete");

        assert!(!favorites.exists(&shopper, &doomed.id()).await.expect("exists"));
        assert_eq!(
            favorites.list_listing_ids(&shopper).await.expect("list"),
            vec![kept.id()]
        );
    }

    #[tokio::test]
    async fn updating_a_missing_listing_fails() {
        let repo = InMemoryListingRepository::new();
        let err = repo
            .update_status(&ListingId::random(), ListingStatus::Sold)
            .await
            .expect_err("missing listing");
        assert!(matches!(err, ListingRepositoryError::Query { .. }));
    }
}
