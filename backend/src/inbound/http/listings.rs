//! Listing browse, search, detail and seller maintenance handlers.
//!
//! ```text
//! GET    /api/v1/listings?category=CPU&brand=AMD&sort=priceAsc&page=2
//! GET    /api/v1/search?q=ryzen&scope=quick
//! GET    /api/v1/listings/{id}
//! POST   /api/v1/listings
//! PUT    /api/v1/listings/{id}
//! PUT    /api/v1/listings/{id}/status {"status":"sold"}
//! DELETE /api/v1/listings/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{BrowseCriteria, Condition, Error, ListingDraft, SearchCriteria};
use crate::domain::ports::ListingDetail;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ListingPageResponse, ListingResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_listing_id, parse_page, parse_query, parse_scope, parse_sort, parse_status,
};

/// Query string for `GET /listings`.
///
/// Values stay raw strings so malformed input maps to the storefront's own
/// validation errors rather than Actix's query rejection.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BrowseParams {
    /// Category name from the taxonomy.
    #[param(example = "CPU")]
    pub category: Option<String>,
    /// Brand group within the category.
    #[param(example = "AMD")]
    pub brand: Option<String>,
    /// Model within the brand group.
    #[param(example = "Ryzen 7")]
    pub model: Option<String>,
    /// `newest`, `priceAsc` or `priceDesc`.
    #[param(example = "priceAsc")]
    pub sort: Option<String>,
    /// 1-based page number.
    #[param(example = "1")]
    pub page: Option<String>,
}

/// Query string for `GET /search`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Free-text query, matched case-insensitively.
    #[param(example = "ryzen")]
    pub q: Option<String>,
    /// `quick` matches titles and tags; `full` adds descriptions.
    #[param(example = "full")]
    pub scope: Option<String>,
    /// 1-based page number.
    #[param(example = "1")]
    pub page: Option<String>,
}

/// Listing content submitted on the sell form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingRequest {
    #[schema(example = "AMD Ryzen 7 5800X")]
    pub title: String,
    pub description: String,
    /// Price in yen; must be positive.
    #[schema(example = 32000)]
    pub price: i64,
    /// Defaults to `new` when omitted.
    #[serde(default)]
    pub condition: Option<Condition>,
    #[schema(example = "CPU")]
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Image URLs; the first becomes the primary image.
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl From<ListingRequest> for ListingDraft {
    fn from(value: ListingRequest) -> Self {
        Self {
            title: value.title,
            description: value.description,
            price: value.price,
            condition: value.condition,
            category: value.category,
            brand: value.brand,
            model: value.model,
            tags: value.tags,
            image_urls: value.image_urls,
        }
    }
}

/// Body for `PUT /listings/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    #[schema(example = "sold")]
    pub status: String,
}

/// A listing with related listings from its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetailResponse {
    pub listing: ListingResponse,
    pub related: Vec<ListingResponse>,
    /// Whether the signed-in viewer favorites the listing; absent for
    /// anonymous viewers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorited: Option<bool>,
}

impl From<ListingDetail> for ListingDetailResponse {
    fn from(detail: ListingDetail) -> Self {
        Self {
            listing: detail.listing.into(),
            related: detail.related.into_iter().map(Into::into).collect(),
            favorited: None,
        }
    }
}

/// Browse active listings by category, brand and model.
#[utoipa::path(
    get,
    path = "/api/v1/listings",
    params(BrowseParams),
    responses(
        (
            status = 200,
            description = "One page of active listings",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = ListingPageResponse
        ),
        (status = 400, description = "Invalid page or sort", body = Error),
        (status = 503, description = "Listing store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["listings"],
    operation_id = "browseListings",
    security([])
)]
#[get("/listings")]
pub async fn browse_listings(
    req: HttpRequest,
    state: web::Data<HttpState>,
    params: web::Query<BrowseParams>,
) -> ApiResult<HttpResponse> {
    let params = params.into_inner();
    let page = parse_page(params.page.as_deref(), state.page_size)?;
    let sort = parse_sort(params.sort.as_deref())?;
    let criteria = BrowseCriteria::new(page)
        .with_category(params.category.as_deref())
        .with_brand(params.brand.as_deref())
        .with_model(params.model.as_deref())
        .with_sort(sort);

    let page = state.listings.browse(criteria).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(ListingPageResponse::from(page).linked_to(&req.full_url())))
}

/// Free-text search over active listings, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/search",
    params(SearchParams),
    responses(
        (
            status = 200,
            description = "One page of matching listings",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = ListingPageResponse
        ),
        (status = 400, description = "Blank query, bad page or scope", body = Error),
        (status = 503, description = "Listing store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["listings"],
    operation_id = "searchListings",
    security([])
)]
#[get("/search")]
pub async fn search_listings(
    req: HttpRequest,
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<HttpResponse> {
    let params = params.into_inner();
    let query = parse_query(params.q.as_deref())?;
    let scope = parse_scope(params.scope.as_deref())?;
    let page = parse_page(params.page.as_deref(), state.page_size)?;

    let page = state
        .listings
        .search(SearchCriteria::new(query, scope, page))
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(ListingPageResponse::from(page).linked_to(&req.full_url())))
}

/// A listing and related listings. Hidden listings resolve only for their seller.
#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing id")),
    responses(
        (
            status = 200,
            description = "Listing detail",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = ListingDetailResponse
        ),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "Unknown or hidden listing", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["listings"],
    operation_id = "listingDetail",
    security([], ("SessionCookie" = []))
)]
#[get("/listings/{id}")]
pub async fn listing_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_listing_id(&path.into_inner())?;
    let viewer = session.user_id()?;
    let detail = state.listings.listing_detail(id, viewer.clone()).await?;
    let mut response = ListingDetailResponse::from(detail);
    if let Some(viewer) = viewer {
        response.favorited = Some(state.favorites_query.is_favorited(&viewer, &id).await?);
    }
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(response))
}

/// Publish a new listing as the signed-in seller.
#[utoipa::path(
    post,
    path = "/api/v1/listings",
    request_body = ListingRequest,
    responses(
        (status = 201, description = "Listing published", body = ListingResponse),
        (status = 400, description = "Invalid listing content", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["listings"],
    operation_id = "createListing"
)]
#[post("/listings")]
pub async fn create_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ListingRequest>,
) -> ApiResult<HttpResponse> {
    let seller = session.require_user_id()?;
    let listing = state
        .listing_commands
        .create(&seller, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(ListingResponse::from(listing)))
}

/// Replace a listing's content.
#[utoipa::path(
    put,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing id")),
    request_body = ListingRequest,
    responses(
        (status = 200, description = "Listing updated", body = ListingResponse),
        (status = 400, description = "Invalid listing content", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Listing owned by another seller", body = Error),
        (status = 404, description = "Unknown listing", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["listings"],
    operation_id = "updateListing"
)]
#[put("/listings/{id}")]
pub async fn update_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ListingRequest>,
) -> ApiResult<web::Json<ListingResponse>> {
    let seller = session.require_user_id()?;
    let id = parse_listing_id(&path.into_inner())?;
    let listing = state
        .listing_commands
        .update(&seller, id, payload.into_inner().into())
        .await?;
    Ok(web::Json(listing.into()))
}

/// Mark a listing active, sold or hidden.
#[utoipa::path(
    put,
    path = "/api/v1/listings/{id}/status",
    params(("id" = String, Path, description = "Listing id")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ListingResponse),
        (status = 400, description = "Unknown status", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Listing owned by another seller", body = Error),
        (status = 404, description = "Unknown listing", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["listings"],
    operation_id = "changeListingStatus"
)]
#[put("/listings/{id}/status")]
pub async fn change_listing_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<StatusRequest>,
) -> ApiResult<web::Json<ListingResponse>> {
    let seller = session.require_user_id()?;
    let id = parse_listing_id(&path.into_inner())?;
    let status = parse_status(&payload.status)?;
    let listing = state
        .listing_commands
        .change_status(&seller, id, status)
        .await?;
    Ok(web::Json(listing.into()))
}

/// Delete a listing and its images.
#[utoipa::path(
    delete,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing id")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Listing owned by another seller", body = Error),
        (status = 404, description = "Unknown listing", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["listings"],
    operation_id = "deleteListing"
)]
#[delete("/listings/{id}")]
pub async fn delete_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let seller = session.require_user_id()?;
    let id = parse_listing_id(&path.into_inner())?;
    state.listing_commands.delete(&seller, id).await?;
    Ok(HttpResponse::NoContent().finish())
}
