//! Extractors resolving the session's user id to a user record.
//!
//! [`CurrentUser`] yields `None` for anonymous requests and for sessions
//! whose account no longer exists. [`SignedIn`] additionally sends such
//! requests to the login page.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, User};
use crate::middleware::LOGIN_PATH;

use super::session::SessionContext;
use super::state::HttpState;

/// The signed-in user, if any.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }

    /// The user, or `401 Unauthorized`.
    pub fn require(self) -> Result<User, Error> {
        self.0.ok_or_else(|| Error::unauthorized("login required"))
    }
}

async fn resolve(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> Result<Option<User>, Error> {
    let Some(id) = session.user_id()? else {
        return Ok(None);
    };
    let user = state.accounts.current_user(&id).await?;
    if user.is_none() {
        tracing::info!(user_id = %id, "session refers to a missing account");
    }
    Ok(user)
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = session.await?;
            let state = state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let user = resolve(session, state).await?;
            Ok(CurrentUser(user))
        })
    }
}

/// Rejection raised by [`SignedIn`] for anonymous requests.
#[derive(Debug)]
pub struct LoginRequired;

impl fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("login required")
    }
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((LOCATION, LOGIN_PATH))
            .finish()
    }
}

/// A signed-in user; anonymous requests are redirected to the login page.
#[derive(Debug, Clone)]
pub struct SignedIn(pub User);

impl FromRequest for SignedIn {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let current = CurrentUser::from_request(req, payload);
        Box::pin(async move {
            match current.await?.0 {
                Some(user) => Ok(SignedIn(user)),
                None => Err(LoginRequired.into()),
            }
        })
    }
}
