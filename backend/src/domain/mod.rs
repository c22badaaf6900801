//! Domain primitives, aggregates and use-cases.
//!
//! Purpose: define the blog's entities and the services that act on them
//! without reference to HTTP or storage. Inbound adapters call the driving
//! ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload shared by every layer.
//! - User, AuthorSnapshot, Post, PostDraft: stored records.
//! - UserId, PostId: 24-character hex record identifiers.
//! - AccountServiceImpl, BlogServiceImpl: use-case implementations.

pub mod access;
pub mod account_service;
pub mod auth;
pub mod blog_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod post;
pub mod record_id;
pub mod trace_id;
pub mod user;

pub use self::access::{RESTRICTED_SEGMENTS, requires_login};
pub use self::account_service::AccountServiceImpl;
pub use self::auth::{LoginCredentials, LoginError, Registration, RegistrationError};
pub use self::blog_service::{BlogServiceImpl, UserProfile};
pub use self::error::{Error, ErrorCode};
pub use self::password::{PasswordDigest, PasswordDigestError};
pub use self::post::{Post, PostDraft};
pub use self::record_id::{PostId, RECORD_ID_LEN, RecordIdError, UserId};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{AuthorSnapshot, User};

/// Convenient result alias for use-cases that fail with [`Error`].
///
/// # Examples
/// ```
/// use blog::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("There is no blog posted that matches that query"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
