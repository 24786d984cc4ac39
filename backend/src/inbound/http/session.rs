//! Cookie session access for handlers.
//!
//! [`SessionContext`] wraps the Actix session so handlers speak in terms of
//! the signed-in shopper: store the user after login, read the optional
//! viewer on public pages, or demand a user on seller and favorite routes.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Extractor exposing the signed-in user of the current request.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `user_id` in a freshly issued session cookie.
    ///
    /// The session key is renewed so a cookie captured before login cannot be
    /// replayed as the signed-in user.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The signed-in user, or `None` for anonymous requests.
    ///
    /// A cookie holding a malformed id is treated as anonymous.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let stored = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(stored.and_then(|raw| {
            UserId::new(&raw)
                .inspect_err(|error| warn!(%error, "invalid user id in session cookie"))
                .ok()
        }))
    }

    /// The signed-in user, or `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
