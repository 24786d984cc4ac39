//! Domain primitives, aggregates and use-case services.
//!
//! Purpose: Define strongly typed marketplace entities and the pure listing
//! resolver used by the API and persistence layers. Keep types immutable and
//! document invariants and serialisation contracts (serde) in each type's
//! Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Listing (alias to `listing::Listing`): an item offered for sale.
//! - BrowseCriteria / SearchCriteria: validated browse and search input.
//! - ListingsService / FavoritesService: implementations of the driving
//!   ports in [`ports`].

pub mod auth;
pub mod error;
pub mod favorite;
mod favorites_service;
pub mod listing;
mod listings_service;
pub mod ports;
pub mod search;
pub mod tag_synonyms;
pub mod taxonomy;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::favorite::FavoriteState;
pub use self::favorites_service::FavoritesService;
pub use self::listing::{
    Condition, Listing, ListingContent, ListingDraft, ListingId, ListingImage, ListingParts,
    ListingStatus, ListingValidationError,
};
pub use self::listings_service::{DEFAULT_RELATED_LIMIT, ListingsService};
pub use self::search::{
    BrowseCriteria, SearchCriteria, SearchQuery, SearchQueryError, SearchScope, SortMode,
    UnknownSortModeError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserIdValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use storefront::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
