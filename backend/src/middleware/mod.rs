//! Request middleware.
//!
//! Cross-cutting request concerns: trace correlation and the login guard.

pub mod login_guard;
pub mod trace;

pub use login_guard::{LOGIN_PATH, LoginGuard};
pub use trace::Trace;
