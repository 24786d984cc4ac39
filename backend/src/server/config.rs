//! Server settings loaded via OrthoConfig and the assembled server config.

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use storefront::domain::DEFAULT_RELATED_LIMIT;
use storefront::inbound::http::state::DEFAULT_PAGE_SIZE;
use storefront::outbound::persistence::{DbPool, PoolConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Invalid values in [`StorefrontSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("STOREFRONT_PAGE_SIZE must be at least 1")]
    ZeroPageSize,
    #[error("STOREFRONT_POOL_MAX_SIZE must be at least 1")]
    ZeroPoolSize,
}

/// Storefront settings read from `STOREFRONT_*` variables, config files and
/// CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct StorefrontSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory adapters are used when absent.
    pub database_url: Option<String>,
    /// Listings per browse or search page.
    #[ortho_config(default = 20)]
    pub page_size: u32,
    /// Related listings shown on a detail page.
    #[ortho_config(default = 5)]
    pub related_limit: u32,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Idle connections the pool keeps open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    #[ortho_config(default = 30)]
    pub pool_timeout_secs: u64,
}

impl StorefrontSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL, treating a blank value as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn page_size(&self) -> Result<NonZeroU32, SettingsError> {
        NonZeroU32::new(self.page_size).ok_or(SettingsError::ZeroPageSize)
    }

    pub fn related_limit(&self) -> u32 {
        self.related_limit
    }

    /// Pool configuration for `database_url`.
    pub fn pool_config(&self, database_url: &str) -> Result<PoolConfig, SettingsError> {
        if self.pool_max_size == 0 {
            return Err(SettingsError::ZeroPoolSize);
        }
        Ok(PoolConfig::new(database_url)
            .with_max_size(self.pool_max_size)
            .with_min_idle(self.pool_min_idle)
            .with_connection_timeout(Duration::from_secs(self.pool_timeout_secs)))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) page_size: NonZeroU32,
    pub(crate) related_limit: u32,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            page_size: DEFAULT_PAGE_SIZE,
            related_limit: DEFAULT_RELATED_LIMIT,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Serve listings from PostgreSQL instead of the in-memory adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: NonZeroU32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_related_limit(mut self, related_limit: u32) -> Self {
        self.related_limit = related_limit;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
