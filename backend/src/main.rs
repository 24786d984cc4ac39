//! Storefront entry-point: loads settings, prepares storage and serves the API.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, StorefrontSettings, create_server};
use storefront::inbound::http::health::HealthState;
use storefront::inbound::http::session_config::{BuildMode, session_settings_from_env};
use storefront::outbound::persistence::{DbPool, run_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = StorefrontSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let env = DefaultEnv::default();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr().map_err(io::Error::other)?,
    )
    .with_page_size(settings.page_size().map_err(io::Error::other)?)
    .with_related_limit(settings.related_limit());

    if let Some(database_url) = settings.database_url() {
        run_migrations(database_url)
            .await
            .map_err(|e| io::Error::other(format!("migrations failed: {e}")))?;
        let pool_config = settings
            .pool_config(database_url)
            .map_err(io::Error::other)?;
        info!(max_size = pool_config.max_size(), "connecting database pool");
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| io::Error::other(format!("database pool failed: {e}")))?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::make_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!("storefront listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
