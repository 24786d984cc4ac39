//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{favorites, listing_images, listings};

/// Row struct for reading from the listings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = listings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListingRow {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub condition: String,
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub tags: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new listings.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = listings)]
pub(crate) struct NewListingRow<'a> {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub condition: &'a str,
    pub category: &'a str,
    pub brand: Option<&'a str>,
    pub model: Option<&'a str>,
    pub tags: &'a [String],
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Changeset for the seller-editable listing columns.
///
/// `treat_none_as_null` clears brand and model when the seller removes them.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = listings)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ListingContentUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub condition: &'a str,
    pub category: &'a str,
    pub brand: Option<&'a str>,
    pub model: Option<&'a str>,
    pub tags: &'a [String],
}

/// Row struct for listing images.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = listing_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListingImageRow {
    pub listing_id: Uuid,
    pub position: i32,
    pub url: String,
    pub is_primary: bool,
}

/// Insertable struct for favorites; `created_at` defaults to `now()`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = favorites)]
pub(crate) struct NewFavoriteRow {
    pub user_id: Uuid,
    pub listing_id: Uuid,
}
