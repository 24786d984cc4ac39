//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows (`models.rs`, `schema.rs`) and
//! domain listings. They hold no marketplace rules; matching that storage
//! cannot express stays in the domain resolver.
//!
//! # Example
//!
//! ```no_run
//! # async fn wire() -> Result<(), storefront::outbound::persistence::PoolError> {
//! use storefront::outbound::persistence::{
//!     DbPool, DieselListingRepository, PoolConfig, run_migrations,
//! };
//!
//! let url = "postgres://storefront@localhost/storefront";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let listings = DieselListingRepository::new(pool);
//! # let _ = listings;
//! # Ok(())
//! # }
//! ```

mod diesel_favorite_repository;
mod diesel_listing_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use diesel_listing_repository::DieselListingRepository;
pub use migrations::run_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
