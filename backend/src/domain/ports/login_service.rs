//! Driving port for seller and buyer sign-in.
//!
//! The HTTP login handler authenticates through this trait so it never
//! touches account storage directly.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// User id issued by [`FixtureLoginService`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Development authenticator with a single account.
///
/// `admin` / `password` signs in as [`FIXTURE_USER_ID`]; anything else is
/// rejected as unauthorized.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() == "admin" && credentials.password() == "password" {
            UserId::new(FIXTURE_USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
