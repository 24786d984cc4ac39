//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`ListingsQuery`, `ListingsCommand`, `FavoritesCommand`,
//! `FavoritesQuery`, `LoginService`) are called by inbound adapters. Driven
//! ports (`ListingRepository`, `FavoriteRepository`) are implemented by the
//! persistence and in-memory adapters.

mod macros;
pub(crate) use macros::port_error;

mod favorite_repository;
mod favorites_command;
mod favorites_query;
mod listing_repository;
mod listings_command;
mod listings_query;
mod login_service;

#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
pub use favorite_repository::{
    FavoriteRepository, FavoriteRepositoryError, FixtureFavoriteRepository,
};
#[cfg(test)]
pub use favorites_command::MockFavoritesCommand;
pub use favorites_command::{FavoritesCommand, FixtureFavoritesCommand};
#[cfg(test)]
pub use favorites_query::MockFavoritesQuery;
pub use favorites_query::{FavoritesQuery, FixtureFavoritesQuery};
#[cfg(test)]
pub use listing_repository::MockListingRepository;
pub use listing_repository::{
    FixtureListingRepository, ListingQuery, ListingRepository, ListingRepositoryError,
    ListingSlice,
};
#[cfg(test)]
pub use listings_command::MockListingsCommand;
pub use listings_command::{FixtureListingsCommand, ListingsCommand};
#[cfg(test)]
pub use listings_query::MockListingsQuery;
pub use listings_query::{FixtureListingsQuery, ListingDetail, ListingsQuery};
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
