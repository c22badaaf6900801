//! Driving port for account use-cases.
//!
//! Inbound adapters register, authenticate and resolve users through this
//! trait so handler tests can substitute a double for the real service.

use async_trait::async_trait;

use crate::domain::{
    Error, LoginCredentials, LoginError, Registration, RegistrationError, User, UserId,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account, returning its new id.
    async fn register(&self, registration: &Registration) -> Result<UserId, RegistrationError>;

    /// Check credentials and return the matching user.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, LoginError>;

    /// Resolve the user a session refers to. `None` when the account no
    /// longer exists.
    async fn current_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}
