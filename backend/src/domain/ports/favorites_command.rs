//! Driving port for toggling favorites.

use async_trait::async_trait;

use crate::domain::{Error, FavoriteState, ListingId, UserId};

/// Domain use-case port for favoriting listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesCommand: Send + Sync {
    /// Add the listing to the user's favorites, or remove it if present.
    ///
    /// Toggling twice restores the original state. An unknown listing yields
    /// `not_found`.
    async fn toggle(&self, user: &UserId, listing: ListingId) -> Result<FavoriteState, Error>;
}

/// Fixture command reporting every toggle as a new favorite.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoritesCommand;

#[async_trait]
impl FavoritesCommand for FixtureFavoritesCommand {
    async fn toggle(&self, _user: &UserId, _listing: ListingId) -> Result<FavoriteState, Error> {
        Ok(FavoriteState { favorited: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_toggle_reports_favorited() {
        let state = FixtureFavoritesCommand
            .toggle(&UserId::random(), ListingId::random())
            .await
            .expect("fixture toggle succeeds");
        assert!(state.favorited);
    }
}
