//! Driven port for the credential store.
use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user repository adapters.
    pub enum UserRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "user repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Insert refused: the username belongs to another account.
        UsernameTaken => "username already registered",
        /// Insert refused: the email belongs to another account.
        EmailTaken => "email already registered",
    }
}

impl From<UserRepositoryError> for Error {
    fn from(value: UserRepositoryError) -> Self {
        match value {
            UserRepositoryError::Connection { message } => Error::service_unavailable(message),
            other => Error::internal(other.to_string()),
        }
    }
}

/// Persistence for registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user.
    ///
    /// Uniqueness is enforced atomically with the write: when both the
    /// username and the email clash, [`UserRepositoryError::UsernameTaken`]
    /// wins.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by exact, case-sensitive username.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserRepositoryError>;
}
