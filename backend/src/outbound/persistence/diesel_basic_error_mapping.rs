//! Diesel and pool failure mapping shared by the repositories.
//!
//! Both repository error enums expose `connection` and `query`
//! constructors; these helpers pick between them and log the underlying
//! cause at debug level, since the messages handed upward are redacted.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure through the repository's connection constructor.
pub(super) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    debug!(error = %error, "connection pool failure");
    connection(error.into_message())
}

/// Map a Diesel failure to a connection or query error.
pub(super) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DeserializationError(_) | DieselError::SerializationError(_) => {
            query("row conversion error")
        }
        _ => query("database error"),
    }
}

/// Name of the unique constraint a failed insert tripped, if any.
pub(super) fn unique_violation(error: &DieselError) -> Option<&str> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            Some(info.constraint_name().unwrap_or_default())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{PostRepositoryError, UserRepositoryError};
    use rstest::rstest;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"), UserRepositoryError::connection);
        assert_eq!(err, UserRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn missing_rows_become_query_errors() {
        let err = map_diesel_error(
            DieselError::NotFound,
            PostRepositoryError::query,
            PostRepositoryError::connection,
        );
        assert_eq!(err, PostRepositoryError::query("record not found"));
    }

    #[rstest]
    fn non_database_errors_are_not_unique_violations() {
        assert_eq!(unique_violation(&DieselError::NotFound), None);
    }
}
