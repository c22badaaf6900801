//! Session wrapper exposing only what the handlers need.
//!
//! The cookie holds nothing but the signed-in user's id. The user record is
//! looked up again on every request that needs it.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "currentUser";

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Handler-facing view of the actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember `user_id` as the signed-in user. The session key is renewed
    /// so a pre-login cookie cannot be replayed as a signed-in one.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Id stored in the session. A tampered or malformed value reads as
    /// absent.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match UserId::new(&raw) {
            Ok(id) => Some(id),
            Err(error) => {
                tracing::warn!(%error, "invalid user id in session cookie");
                None
            }
        }))
    }

    /// Drop everything and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
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
