//! Builders wiring repository adapters into the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use storefront::domain::ports::{FavoriteRepository, FixtureLoginService, ListingRepository};
use storefront::domain::{FavoritesService, ListingsService};
use storefront::inbound::http::state::{HttpState, HttpStatePorts};
use storefront::outbound::memory::InMemoryListingRepository;
use storefront::outbound::persistence::{DieselFavoriteRepository, DieselListingRepository};

use super::ServerConfig;

/// Wrap a listing and favorite repository pair in the domain services.
///
/// One `ListingsService` backs both listing ports so commands and queries see
/// the same store.
fn ports_over<L, F>(listings: Arc<L>, favorites: Arc<F>, related_limit: u32) -> HttpStatePorts
where
    L: ListingRepository + 'static,
    F: FavoriteRepository + 'static,
{
    let listings_service = Arc::new(
        ListingsService::new(listings.clone(), Arc::new(DefaultClock))
            .with_related_limit(related_limit),
    );
    let favorites_service = Arc::new(FavoritesService::new(favorites, listings));
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        listings: listings_service.clone(),
        listing_commands: listings_service,
        favorites: favorites_service.clone(),
        favorites_query: favorites_service,
    }
}

/// Build HTTP state over PostgreSQL when a pool is configured, otherwise over
/// the in-memory adapters.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("serving listings from PostgreSQL");
            ports_over(
                Arc::new(DieselListingRepository::new(pool.clone())),
                Arc::new(DieselFavoriteRepository::new(pool.clone())),
                config.related_limit,
            )
        }
        None => {
            info!("no database configured; serving listings from memory");
            let listings = InMemoryListingRepository::new();
            let favorites = listings.favorites();
            ports_over(Arc::new(listings), Arc::new(favorites), config.related_limit)
        }
    };
    web::Data::new(HttpState::new(ports).with_page_size(config.page_size))
}
