//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every storefront endpoint, the response payloads they
//! return and the session cookie security scheme. The document backs Swagger
//! UI in debug builds and is exported by `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Condition, Error, ErrorCode, FavoriteState, ListingImage, ListingStatus, SearchScope, SortMode,
};
use crate::inbound::http::catalogue::{
    BrandResponse, CategoryResponse, CategoryTagsResponse, SynonymsResponse,
};
use crate::inbound::http::health::{Phase, ProbeResponse};
use crate::inbound::http::listings::{ListingDetailResponse, ListingRequest, StatusRequest};
use crate::inbound::http::schemas::{
    ListingListResponse, ListingPageResponse, ListingResponse, PageLinksResponse,
    PaginationResponse,
};
use crate::inbound::http::users::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the storefront REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Storefront API",
        description = "Listing browse, search, favorites and seller maintenance for the PC-parts marketplace."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::my_listings,
        crate::inbound::http::listings::browse_listings,
        crate::inbound::http::listings::search_listings,
        crate::inbound::http::listings::listing_detail,
        crate::inbound::http::listings::create_listing,
        crate::inbound::http::listings::update_listing,
        crate::inbound::http::listings::change_listing_status,
        crate::inbound::http::listings::delete_listing,
        crate::inbound::http::favorites::toggle_favorite,
        crate::inbound::http::favorites::my_favorites,
        crate::inbound::http::catalogue::list_categories,
        crate::inbound::http::catalogue::category_tags,
        crate::inbound::http::catalogue::expand_synonyms,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        ListingRequest,
        StatusRequest,
        ListingResponse,
        ListingDetailResponse,
        ListingPageResponse,
        ListingListResponse,
        PaginationResponse,
        PageLinksResponse,
        ListingImage,
        Condition,
        ListingStatus,
        SortMode,
        SearchScope,
        FavoriteState,
        CategoryResponse,
        BrandResponse,
        CategoryTagsResponse,
        SynonymsResponse,
        ProbeResponse,
        Phase,
    )),
    tags(
        (name = "listings", description = "Browse, search and seller maintenance of listings"),
        (name = "favorites", description = "Shopper favorites"),
        (name = "catalogue", description = "Category taxonomy and tag synonyms"),
        (name = "users", description = "Sign-in and signed-in user views"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
