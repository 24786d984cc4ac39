//! In-process adapters for running without a database.
//!
//! The server wires these when no database URL is configured, and the
//! behavioural suite drives the full stack through them. State lives behind a
//! `tokio::sync::RwLock` and is lost on restart.

mod favorite_repository;
mod listing_repository;

pub use favorite_repository::InMemoryFavoriteRepository;
pub use listing_repository::InMemoryListingRepository;
