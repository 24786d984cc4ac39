//! Driven port for favorite persistence.

use async_trait::async_trait;

use crate::domain::{ListingId, UserId};

use super::port_error;

port_error! {
    /// Errors raised by favorite repository adapters.
    pub enum FavoriteRepositoryError {
        /// Repository connection could not be established.
        Connection => "favorite repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "favorite repository query failed: {message}",
        /// The favorite already exists.
        Conflict => "favorite already exists: {message}",
    }
}

/// Port for a user's saved listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Whether `user` has favorited `listing`.
    async fn exists(&self, user: &UserId, listing: &ListingId)
    -> Result<bool, FavoriteRepositoryError>;

    /// Record a favorite.
    ///
    /// Returns [`FavoriteRepositoryError::Conflict`] when it already exists.
    async fn insert(&self, user: &UserId, listing: &ListingId)
    -> Result<(), FavoriteRepositoryError>;

    /// Remove a favorite; removing a missing favorite is not an error.
    async fn remove(&self, user: &UserId, listing: &ListingId)
    -> Result<(), FavoriteRepositoryError>;

    /// Favorited listing ids, most recently favorited first.
    async fn list_listing_ids(&self, user: &UserId)
    -> Result<Vec<ListingId>, FavoriteRepositoryError>;
}

/// Fixture repository that holds no favorites and discards writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoriteRepository;

#[async_trait]
impl FavoriteRepository for FixtureFavoriteRepository {
    async fn exists(
        &self,
        _user: &UserId,
        _listing: &ListingId,
    ) -> Result<bool, FavoriteRepositoryError> {
        Ok(false)
    }

    async fn insert(
        &self,
        _user: &UserId,
        _listing: &ListingId,
    ) -> Result<(), FavoriteRepositoryError> {
        Ok(())
    }

    async fn remove(
        &self,
        _user: &UserId,
        _listing: &ListingId,
    ) -> Result<(), FavoriteRepositoryError> {
        Ok(())
    }

    async fn list_listing_ids(
        &self,
        _user: &UserId,
    ) -> Result<Vec<ListingId>, FavoriteRepositoryError> {
        Ok(Vec::new())
    }
}
