//! `bb8` pool of `diesel-async` PostgreSQL connections shared by the listing
//! and favorite repositories.
//!
//! Checkout honours the configured timeout; every failure surfaces as a
//! [`PoolError`], which repositories turn into their `Connection` variant.

use std::time::Duration;

use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Pool sizing and checkout settings.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use storefront::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://storefront@localhost/storefront")
///     .with_max_size(16)
///     .with_min_idle(Some(4))
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Configuration for `database_url` with 10 connections, 2 kept idle and
    /// a 30 second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            min_idle: Some(2),
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum number of connections in the pool.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the minimum number of idle connections to maintain.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the connection checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Database URL the pool connects to.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Upper bound on open connections.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Cloneable handle to the connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool and open its idle connections.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the URL is invalid or the initial
    /// connections fail.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when none frees up before the timeout.
    pub async fn get(
        &self,
    ) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn defaults_suit_a_small_service() {
        let config = PoolConfig::new("postgres://localhost/storefront");

        assert_eq!(config.database_url(), "postgres://localhost/storefront");
        assert_eq!(config.max_size(), 10);
        assert_eq!(config.min_idle, Some(2));
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }

    #[rstest]
    #[case(1, None, 1)]
    #[case(32, Some(8), 5)]
    fn builders_override_defaults(
        #[case] max_size: u32,
        #[case] min_idle: Option<u32>,
        #[case] timeout_secs: u64,
    ) {
        let config = PoolConfig::new("postgres://localhost/storefront")
            .with_max_size(max_size)
            .with_min_idle(min_idle)
            .with_connection_timeout(Duration::from_secs(timeout_secs));

        assert_eq!(config.max_size(), max_size);
        assert_eq!(config.min_idle, min_idle);
        assert_eq!(config.connection_timeout, Duration::from_secs(timeout_secs));
    }

    #[rstest]
    fn errors_carry_their_cause() {
        assert_eq!(
            PoolError::checkout("timed out").to_string(),
            "failed to get connection from pool: timed out"
        );
        assert_eq!(
            PoolError::build("bad url").to_string(),
            "failed to build connection pool: bad url"
        );
    }
}
