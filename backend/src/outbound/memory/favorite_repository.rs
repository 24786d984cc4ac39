//! In-memory implementation of [`FavoriteRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError};
use crate::domain::{ListingId, UserId};

/// Favorites kept in the order they were added.
///
/// Clones share the same rows. [`super::InMemoryListingRepository::favorites`]
/// hands out a clone tied to its listings so deleting a listing drops its
/// favorites, as the database cascade does.
#[derive(Debug, Default, Clone)]
pub struct InMemoryFavoriteRepository {
    favorites: Arc<RwLock<Vec<(UserId, ListingId)>>>,
}

impl InMemoryFavoriteRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every user's favorite of `listing`.
    pub(super) async fn forget_listing(&self, listing: &ListingId) {
        self.favorites
            .write()
            .await
            .retain(|(_, id)| id != listing);
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn exists(
        &self,
        user: &UserId,
        listing: &ListingId,
    ) -> Result<bool, FavoriteRepositoryError> {
        Ok(self
            .favorites
            .read()
            .await
            .iter()
            .any(|(owner, id)| owner == user && id == listing))
    }

    async fn insert(&self, user: &UserId, listing: &ListingId) -> Result<(), FavoriteRepositoryError> {
        let mut favorites = self.favorites.write().await;
        if favorites
            .iter()
            .any(|(owner, id)| owner == user && id == listing)
        {
            return Err(FavoriteRepositoryError::conflict(listing.to_string()));
        }
        favorites.push((user.clone(), *listing));
        Ok(())
    }

    async fn remove(&self, user: &UserId, listing: &ListingId) -> Result<(), FavoriteRepositoryError> {
        self.favorites
            .write()
            .await
            .retain(|(owner, id)| !(owner == user && id == listing));
        Ok(())
    }

    async fn list_listing_ids(
        &self,
        user: &UserId,
    ) -> Result<Vec<ListingId>, FavoriteRepositoryError> {
        Ok(self
            .favorites
            .read()
            .await
            .iter()
            .rev()
            .filter(|(owner, _)| owner == user)
            .map(|(_, id)| *id)
            .collect())
    }
}
