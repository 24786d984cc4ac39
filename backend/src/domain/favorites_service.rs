//! Favorite domain services.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    FavoriteRepository, FavoriteRepositoryError, FavoritesCommand, FavoritesQuery,
    ListingRepository, ListingRepositoryError,
};
use crate::domain::{Error, FavoriteState, Listing, ListingId, UserId};

fn map_favorite_error(error: FavoriteRepositoryError) -> Error {
    match error {
        FavoriteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("favorite repository unavailable: {message}"))
        }
        FavoriteRepositoryError::Query { message } => {
            Error::internal(format!("favorite repository error: {message}"))
        }
        FavoriteRepositoryError::Conflict { message } => {
            Error::conflict(format!("favorite already exists: {message}"))
        }
    }
}

fn map_listing_error(error: ListingRepositoryError) -> Error {
    match error {
        ListingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("listing repository unavailable: {message}"))
        }
        ListingRepositoryError::Query { message } => {
            Error::internal(format!("listing repository error: {message}"))
        }
    }
}

/// Favorite service implementing the favorite command and query ports.
///
/// A toggle reads the current state and then writes the opposite. Two
/// concurrent toggles race at the storage layer; an insert that loses the
/// race to an identical insert still reports the listing as favorited.
#[derive(Clone)]
pub struct FavoritesService<F, L> {
    favorites: Arc<F>,
    listings: Arc<L>,
}

impl<F, L> FavoritesService<F, L> {
    /// Create a new service with the favorite and listing repositories.
    pub fn new(favorites: Arc<F>, listings: Arc<L>) -> Self {
        Self {
            favorites,
            listings,
        }
    }
}

#[async_trait]
impl<F, L> FavoritesCommand for FavoritesService<F, L>
where
    F: FavoriteRepository,
    L: ListingRepository,
{
    async fn toggle(&self, user: &UserId, listing: ListingId) -> Result<FavoriteState, Error> {
        self.listings
            .find_by_id(&listing)
            .await
            .map_err(map_listing_error)?
            .filter(|found| found.is_visible_to(Some(user)))
            .ok_or_else(|| Error::not_found(format!("listing {listing} not found")))?;

        let present = self
            .favorites
            .exists(user, &listing)
            .await
            .map_err(map_favorite_error)?;

        if present {
            self.favorites
                .remove(user, &listing)
                .await
                .map_err(map_favorite_error)?;
        } else {
            match self.favorites.insert(user, &listing).await {
                Ok(()) => {}
                Err(FavoriteRepositoryError::Conflict { .. }) => {
                    debug!(listing_id = %listing, user_id = %user, "favorite inserted concurrently");
                }
                Err(err) => return Err(map_favorite_error(err)),
            }
        }

        let state = FavoriteState::after_toggle(present);
        info!(listing_id = %listing, user_id = %user, favorited = state.favorited, "favorite toggled");
        Ok(state)
    }
}

#[async_trait]
impl<F, L> FavoritesQuery for FavoritesService<F, L>
where
    F: FavoriteRepository,
    L: ListingRepository,
{
    async fn list(&self, user: &UserId) -> Result<Vec<Listing>, Error> {
        let ids = self
            .favorites
            .list_listing_ids(user)
            .await
            .map_err(map_favorite_error)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut found: HashMap<ListingId, Listing> = self
            .listings
            .find_many(&ids)
            .await
            .map_err(map_listing_error)?
            .into_iter()
            .map(|listing| (listing.id(), listing))
            .collect();

        Ok(ids
            .iter()
            .filter_map(|id| found.remove(id))
            .filter(|listing| listing.is_visible_to(Some(user)))
            .collect())
    }

    async fn is_favorited(&self, user: &UserId, listing: &ListingId) -> Result<bool, Error> {
        self.favorites
            .exists(user, listing)
            .await
            .map_err(map_favorite_error)
    }
}
