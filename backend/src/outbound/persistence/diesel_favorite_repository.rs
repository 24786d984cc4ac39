//! PostgreSQL-backed `FavoriteRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError};
use crate::domain::{ListingId, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewFavoriteRow;
use super::pool::{DbPool, PoolError};
use super::schema::favorites;

/// Diesel-backed implementation of the `FavoriteRepository` port.
#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> FavoriteRepositoryError {
    map_pool_error(error, FavoriteRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> FavoriteRepositoryError {
    map_diesel_error(
        error,
        FavoriteRepositoryError::query,
        FavoriteRepositoryError::connection,
    )
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn exists(
        &self,
        user: &UserId,
        listing: &ListingId,
    ) -> Result<bool, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::select(diesel::dsl::exists(
            favorites::table.find((user.as_uuid(), listing.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(diesel_error)
    }

    async fn insert(&self, user: &UserId, listing: &ListingId) -> Result<(), FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let inserted = diesel::insert_into(favorites::table)
            .values(&NewFavoriteRow {
                user_id: *user.as_uuid(),
                listing_id: *listing.as_uuid(),
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        if inserted == 0 {
            return Err(FavoriteRepositoryError::conflict(listing.to_string()));
        }
        Ok(())
    }

    async fn remove(&self, user: &UserId, listing: &ListingId) -> Result<(), FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::delete(favorites::table.find((user.as_uuid(), listing.as_uuid())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_listing_ids(
        &self,
        user: &UserId,
    ) -> Result<Vec<ListingId>, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let ids: Vec<Uuid> = favorites::table
            .filter(favorites::user_id.eq(user.as_uuid()))
            .order((favorites::created_at.desc(), favorites::listing_id.asc()))
            .select(favorites::listing_id)
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(ids.into_iter().map(ListingId::from_uuid).collect())
    }
}
