//! Driving port for reading a user's favorites.

use async_trait::async_trait;

use crate::domain::{Error, Listing, ListingId, UserId};

/// Domain use-case port for listing favorites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesQuery: Send + Sync {
    /// Favorited listings that still exist, most recently favorited first.
    async fn list(&self, user: &UserId) -> Result<Vec<Listing>, Error>;

    /// Whether `user` currently favorites `listing`.
    async fn is_favorited(&self, user: &UserId, listing: &ListingId) -> Result<bool, Error>;
}

/// Fixture query with no favorites.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoritesQuery;

#[async_trait]
impl FavoritesQuery for FixtureFavoritesQuery {
    async fn list(&self, _user: &UserId) -> Result<Vec<Listing>, Error> {
        Ok(Vec::new())
    }

    async fn is_favorited(&self, _user: &UserId, _listing: &ListingId) -> Result<bool, Error> {
        Ok(false)
    }
}
