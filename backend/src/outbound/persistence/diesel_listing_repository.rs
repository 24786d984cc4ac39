//! PostgreSQL-backed `ListingRepository` implementation using Diesel ORM.
//!
//! Status, category, free-text matching, ordering and the page window are
//! evaluated by PostgreSQL. Text matching uses `ILIKE` with escaped
//! wildcards against the title, the tag list and (on the full scope) the
//! description.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Array, Text};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ListingQuery, ListingRepository, ListingRepositoryError, ListingSlice};
use crate::domain::{
    Condition, Listing, ListingId, ListingImage, ListingParts, ListingStatus, SearchScope,
    SortMode, UserId,
};

use super::error_mapping::{contains_pattern, map_diesel_error, map_pool_error};
use super::models::{ListingContentUpdate, ListingImageRow, ListingRow, NewListingRow};
use super::pool::{DbPool, PoolError};
use super::schema::{listing_images, listings};

/// Separator used when flattening tags for matching; never part of a tag.
const TAG_SEPARATOR: &str = "\u{1f}";

diesel::define_sql_function! {
    /// PostgreSQL `array_to_string(text[], text)`.
    fn array_to_string(array: Array<Text>, delimiter: Text) -> Text;
}

/// Diesel-backed implementation of the `ListingRepository` port.
#[derive(Clone)]
pub struct DieselListingRepository {
    pool: DbPool,
}

impl DieselListingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ListingRepositoryError {
    map_pool_error(error, ListingRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ListingRepositoryError {
    map_diesel_error(
        error,
        ListingRepositoryError::query,
        ListingRepositoryError::connection,
    )
}

fn price_to_db(price: u64) -> Result<i64, ListingRepositoryError> {
    i64::try_from(price).map_err(|_| ListingRepositoryError::query("price exceeds column range"))
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Active listings matching the category and text hints.
fn filtered<'a>(query: &'a ListingQuery) -> listings::BoxedQuery<'a, Pg> {
    let mut statement = listings::table
        .filter(listings::status.eq(ListingStatus::Active.as_str()))
        .into_boxed();

    if let Some(category) = query.category.as_deref() {
        statement = statement.filter(listings::category.eq(category));
    }

    if let Some(text) = &query.text {
        let pattern = contains_pattern(text.query.as_str());
        let in_tags = array_to_string(listings::tags, TAG_SEPARATOR).ilike(pattern.clone());
        statement = match text.scope {
            SearchScope::Quick => {
                statement.filter(listings::title.ilike(pattern).or(in_tags))
            }
            SearchScope::Full => statement.filter(
                listings::title
                    .ilike(pattern.clone())
                    .or(in_tags)
                    .or(listings::description.ilike(pattern)),
            ),
        };
    }
    statement
}

fn ordered(statement: listings::BoxedQuery<'_, Pg>, sort: SortMode) -> listings::BoxedQuery<'_, Pg> {
    match sort {
        SortMode::Newest => statement.order((listings::created_at.desc(), listings::id.asc())),
        SortMode::PriceDesc => statement.order((
            listings::price.desc(),
            listings::created_at.desc(),
            listings::id.asc(),
        )),
        SortMode::PriceAsc => statement.order((
            listings::price.asc(),
            listings::created_at.desc(),
            listings::id.asc(),
        )),
    }
}

fn image_rows(listing: &Listing) -> Vec<ListingImageRow> {
    listing
        .images()
        .iter()
        .zip(0_i32..)
        .map(|(image, position)| ListingImageRow {
            listing_id: *listing.id().as_uuid(),
            position,
            url: image.url.clone(),
            is_primary: image.is_primary,
        })
        .collect()
}

fn row_to_listing(
    row: ListingRow,
    images: Vec<ListingImage>,
) -> Result<Listing, ListingRepositoryError> {
    let condition: Condition = row
        .condition
        .parse()
        .map_err(|err| ListingRepositoryError::query(format!("listing {}: {err}", row.id)))?;
    let status: ListingStatus = row
        .status
        .parse()
        .map_err(|err| ListingRepositoryError::query(format!("listing {}: {err}", row.id)))?;
    let price = u64::try_from(row.price).map_err(|_| {
        ListingRepositoryError::query(format!("listing {} has a negative price", row.id))
    })?;

    Ok(Listing::from_parts(ListingParts {
        id: ListingId::from_uuid(row.id),
        seller_id: UserId::from_uuid(row.seller_id),
        title: row.title,
        description: row.description,
        price,
        condition,
        category: row.category,
        brand: row.brand,
        model: row.model,
        tags: row.tags,
        images,
        status,
        created_at: row.created_at,
    }))
}

/// Load images for `rows` and assemble listings in row order.
async fn hydrate(
    conn: &mut AsyncPgConnection,
    rows: Vec<ListingRow>,
) -> Result<Vec<Listing>, ListingRepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let image_rows: Vec<ListingImageRow> = listing_images::table
        .filter(listing_images::listing_id.eq_any(&ids))
        .order((listing_images::listing_id, listing_images::position))
        .select(ListingImageRow::as_select())
        .load(conn)
        .await
        .map_err(diesel_error)?;

    let mut images: HashMap<Uuid, Vec<ListingImage>> = HashMap::new();
    for image in image_rows {
        images.entry(image.listing_id).or_default().push(ListingImage {
            url: image.url,
            is_primary: image.is_primary,
        });
    }

    rows.into_iter()
        .map(|row| {
            let own_images = images.remove(&row.id).unwrap_or_default();
            row_to_listing(row, own_images)
        })
        .collect()
}

#[async_trait]
impl ListingRepository for DieselListingRepository {
    async fn fetch_active(
        &self,
        query: &ListingQuery,
    ) -> Result<ListingSlice, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let total: i64 = filtered(query)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        let mut statement = ordered(filtered(query), query.sort);
        if let Some(window) = query.window {
            statement = statement
                .offset(to_i64(window.offset()))
                .limit(i64::from(window.limit()));
        }
        let rows: Vec<ListingRow> = statement
            .select(ListingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(ListingSlice {
            listings: hydrate(&mut conn, rows).await?,
            total_count: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<ListingRow> = listings::table
            .find(id.as_uuid())
            .select(ListingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(hydrate(&mut conn, vec![row]).await?.pop())
    }

    async fn find_many(&self, ids: &[ListingId]) -> Result<Vec<Listing>, ListingRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<ListingRow> = listings::table
            .filter(listings::id.eq_any(&uuids))
            .select(ListingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        hydrate(&mut conn, rows).await
    }

    async fn list_by_seller(&self, seller: &UserId) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<ListingRow> = listings::table
            .filter(listings::seller_id.eq(seller.as_uuid()))
            .order((listings::created_at.desc(), listings::id.asc()))
            .select(ListingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        hydrate(&mut conn, rows).await
    }

    async fn list_related(
        &self,
        category: &str,
        exclude: &ListingId,
        limit: u32,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<ListingRow> = listings::table
            .filter(listings::status.eq(ListingStatus::Active.as_str()))
            .filter(listings::category.eq(category))
            .filter(listings::id.ne(exclude.as_uuid()))
            .order((listings::created_at.desc(), listings::id.asc()))
            .limit(i64::from(limit))
            .select(ListingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        hydrate(&mut conn, rows).await
    }

    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        let new_row = NewListingRow {
            id: *listing.id().as_uuid(),
            seller_id: *listing.seller_id().as_uuid(),
            title: listing.title(),
            description: listing.description(),
            price: price_to_db(listing.price())?,
            condition: listing.condition().as_str(),
            category: listing.category(),
            brand: listing.brand(),
            model: listing.model(),
            tags: listing.tags(),
            status: listing.status().as_str(),
            created_at: listing.created_at(),
        };
        let images = image_rows(listing);
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(listings::table)
                    .values(&new_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(listing_images::table)
                    .values(&images)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
    }

    async fn update(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        let id = *listing.id().as_uuid();
        let changes = ListingContentUpdate {
            title: listing.title(),
            description: listing.description(),
            price: price_to_db(listing.price())?,
            condition: listing.condition().as_str(),
            category: listing.category(),
            brand: listing.brand(),
            model: listing.model(),
            tags: listing.tags(),
        };
        let images = image_rows(listing);
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let updated = conn
            .transaction(|conn| {
                async move {
                    let updated = diesel::update(listings::table.find(id))
                        .set((&changes, listings::updated_at.eq(diesel::dsl::now)))
                        .execute(conn)
                        .await?;
                    if updated == 0 {
                        return Ok(0);
                    }
                    diesel::delete(listing_images::table.filter(listing_images::listing_id.eq(id)))
                        .execute(conn)
                        .await?;
                    diesel::insert_into(listing_images::table)
                        .values(&images)
                        .execute(conn)
                        .await?;
                    Ok(updated)
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        if updated == 0 {
            return Err(ListingRepositoryError::query(format!(
                "listing {id} does not exist"
            )));
        }
        Ok(())
    }

    async fn update_status(
        &self,
        id: &ListingId,
        status: ListingStatus,
    ) -> Result<(), ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(listings::table.find(id.as_uuid()))
            .set((
                listings::status.eq(status.as_str()),
                listings::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        if updated == 0 {
            return Err(ListingRepositoryError::query(format!(
                "listing {id} does not exist"
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: &ListingId) -> Result<(), ListingRepositoryError> {
        let uuid = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::delete(listing_images::table.filter(listing_images::listing_id.eq(uuid)))
                    .execute(conn)
                    .await?;
                diesel::delete(listings::table.find(uuid))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use diesel::debug_query;
    use pagination::PageRequest;
    use rstest::rstest;

    use super::*;
    use crate::domain::SearchQuery;
    use crate::domain::listing::fixtures::ListingBuilder;
    use crate::domain::search::TextMatch;

    fn sql(query: &ListingQuery) -> String {
        let mut statement = ordered(filtered(query), query.sort);
        if let Some(window) = query.window {
            statement = statement
                .offset(to_i64(window.offset()))
                .limit(i64::from(window.limit()));
        }
        debug_query::<Pg, _>(&statement.select(ListingRow::as_select())).to_string()
    }

    fn text(raw: &str, scope: SearchScope) -> Option<TextMatch> {
        Some(TextMatch {
            query: SearchQuery::new(raw).expect("query"),
            scope,
        })
    }

    #[rstest]
    fn category_browse_filters_status_and_category() {
        let query = ListingQuery {
            category: Some("GPU".to_owned()),
            ..ListingQuery::default()
        };
        let rendered = sql(&query);

        assert!(rendered.contains("\"listings\".\"status\" = $1"));
        assert!(rendered.contains("\"listings\".\"category\" = $2"));
        assert!(rendered.contains("ORDER BY \"listings\".\"created_at\" DESC"));
    }

    #[rstest]
    #[case(SearchScope::Quick, false)]
    #[case(SearchScope::Full, true)]
    fn text_scope_controls_description_matching(
        #[case] scope: SearchScope,
        #[case] includes_description: bool,
    ) {
        let query = ListingQuery {
            text: text("50%", scope),
            ..ListingQuery::default()
        };
        let rendered = sql(&query);

        assert!(rendered.contains("ILIKE"));
        assert!(rendered.contains("array_to_string"));
        assert!(rendered.contains("%50\\\\%%") || rendered.contains("%50\\%%"));
        assert_eq!(
            rendered.contains("\"listings\".\"description\" ILIKE"),
            includes_description
        );
    }

    #[rstest]
    fn window_renders_offset_and_limit() {
        let page = PageRequest::new(3, 20).expect("valid request");
        let query = ListingQuery {
            sort: SortMode::PriceAsc,
            window: Some(page.window()),
            ..ListingQuery::default()
        };
        let rendered = sql(&query);

        assert!(rendered.contains("ORDER BY \"listings\".\"price\" ASC"));
        assert!(rendered.contains("LIMIT $2 OFFSET $3"));
        assert!(rendered.contains("[\"active\", 20, 40]"));
    }

    #[rstest]
    fn images_keep_their_order_and_primary_flag() {
        let listing = ListingBuilder::new("Case fan").build();
        let rows = image_rows(&listing);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows.as_slice().first().map(|row| row.position), Some(0));
        assert_eq!(rows.as_slice().first().map(|row| row.is_primary), Some(true));
    }

    #[rstest]
    fn unknown_stored_status_is_a_query_error() {
        let row = ListingRow {
            id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
            title: "Stale".to_owned(),
            description: "row".to_owned(),
            price: 1_000,
            condition: "new".to_owned(),
            category: "CPU".to_owned(),
            brand: None,
            model: None,
            tags: Vec::new(),
            status: "archived".to_owned(),
            created_at: chrono::Utc::now(),
        };

        let err = row_to_listing(row, Vec::new()).expect_err("unknown status");
        assert!(matches!(err, ListingRepositoryError::Query { .. }));
    }
}
