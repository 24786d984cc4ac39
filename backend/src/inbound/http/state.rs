//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::num::NonZeroU32;
use std::sync::Arc;

use crate::domain::ports::{
    FavoritesCommand, FavoritesQuery, ListingsCommand, ListingsQuery, LoginService,
};

/// Listings shown per page when no other size is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(20) {
    Some(size) => size,
    None => NonZeroU32::MIN,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub listings: Arc<dyn ListingsQuery>,
    pub listing_commands: Arc<dyn ListingsCommand>,
    pub favorites: Arc<dyn FavoritesCommand>,
    pub favorites_query: Arc<dyn FavoritesQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub listings: Arc<dyn ListingsQuery>,
    pub listing_commands: Arc<dyn ListingsCommand>,
    pub favorites: Arc<dyn FavoritesCommand>,
    pub favorites_query: Arc<dyn FavoritesQuery>,
    pub page_size: NonZeroU32,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle with the default page size.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use storefront::domain::ports::{
    ///     FixtureFavoritesCommand, FixtureFavoritesQuery, FixtureListingsCommand,
    ///     FixtureListingsQuery, FixtureLoginService,
    /// };
    /// use storefront::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService),
    ///     listings: Arc::new(FixtureListingsQuery),
    ///     listing_commands: Arc::new(FixtureListingsCommand),
    ///     favorites: Arc::new(FixtureFavoritesCommand),
    ///     favorites_query: Arc::new(FixtureFavoritesQuery),
    /// });
    /// assert_eq!(state.page_size.get(), 20);
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            listings,
            listing_commands,
            favorites,
            favorites_query,
        } = ports;
        Self {
            login,
            listings,
            listing_commands,
            favorites,
            favorites_query,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the number of listings per browse or search page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: NonZeroU32) -> Self {
        self.page_size = page_size;
        self
    }
}
