//! Domain-level error type.
//!
//! Errors are transport agnostic: inbound adapters decide whether a failure
//! becomes a plain-text notice, a status code, or a re-rendered form.

use std::fmt;

use super::TraceId;

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No authenticated session is present.
    Unauthorized,
    /// The acting user does not own the target resource.
    Forbidden,
    /// The id is malformed or names nothing in the store.
    NotFound,
    /// The backing store could not be reached.
    ServiceUnavailable,
    /// Anything else that went wrong inside the service.
    InternalError,
}

/// Domain error carrying a category, a human-readable message and the trace
/// id of the request it was raised in.
///
/// # Examples
/// ```
/// use blog::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("There is no blog posted that matches that query");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
}

impl Error {
    /// Build an error, capturing the current trace id when one is in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message shown to the visitor.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace id of the originating request.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
