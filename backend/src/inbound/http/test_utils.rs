//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use super::session::SESSION_COOKIE_NAME;

/// Session middleware with a throwaway key and the `Secure` flag off, so
/// cookies survive plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}
