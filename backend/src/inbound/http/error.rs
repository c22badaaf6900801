//! HTTP mapping for domain errors.
//!
//! Failures are reported as plain text, never as a structured body. Internal
//! errors are redacted; every response carries the request's trace id when
//! one was captured.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_message(error: &Error) -> &str {
    match error.code() {
        ErrorCode::InternalError => REDACTED_MESSAGE,
        _ => error.message(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(
            self.code(),
            ErrorCode::InternalError | ErrorCode::ServiceUnavailable
        ) {
            error!(code = ?self.code(), message = self.message(), "request aborted");
        }
        let mut builder = HttpResponse::build(self.status_code());
        builder.content_type(ContentType::plaintext());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.body(public_message(self).to_owned())
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}

#[cfg(test)]
mod tests;
