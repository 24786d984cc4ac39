//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};

use crate::domain::ports::{
    FixtureFavoritesCommand, FixtureFavoritesQuery, FixtureListingsCommand, FixtureListingsQuery,
    FixtureLoginService,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// Each call generates a fresh key and disables the `Secure` flag so cookies
/// travel over plain HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie a response set.
pub fn session_cookie_from(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// HTTP state backed entirely by fixture ports.
///
/// Tests replace individual fields with mocks for the port under test.
pub fn fixture_state() -> HttpState {
    HttpState::new(HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        listings: Arc::new(FixtureListingsQuery),
        listing_commands: Arc::new(FixtureListingsCommand),
        favorites: Arc::new(FixtureFavoritesCommand),
        favorites_query: Arc::new(FixtureFavoritesQuery),
    })
}

/// Route that signs the request in as the given user, for handler tests.
///
/// Mount under `/test-login/{user_id}` and call it before the request under
/// test to obtain a session cookie.
pub async fn test_login(
    session: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let user = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user)?;
    Ok(HttpResponse::Ok().finish())
}
