//! Account use-cases: registration, login and session resolution.
//!
//! Password hashing and verification run on the blocking pool so slow
//! Argon2 rounds do not stall the request executor.

use std::sync::Arc;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{AccountService, UserRepository, UserRepositoryError};
use crate::domain::{
    Error, LoginCredentials, LoginError, PasswordDigest, Registration, RegistrationError, User,
    UserId,
};

/// [`AccountService`] backed by a [`UserRepository`].
#[derive(Clone)]
pub struct AccountServiceImpl<U> {
    users: Arc<U>,
}

impl<U> AccountServiceImpl<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

async fn hash_password(password: &str) -> Result<PasswordDigest, Error> {
    let password = Zeroizing::new(password.to_owned());
    tokio::task::spawn_blocking(move || PasswordDigest::generate(password.as_str()))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(|err| Error::internal(err.to_string()))
}

async fn verify_password(digest: &PasswordDigest, password: &str) -> Result<bool, Error> {
    let digest = digest.clone();
    let password = Zeroizing::new(password.to_owned());
    tokio::task::spawn_blocking(move || digest.verify(password.as_str()))
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
}

#[async_trait]
impl<U> AccountService for AccountServiceImpl<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<UserId, RegistrationError> {
        let digest = hash_password(registration.password()).await?;
        let user = User::new(
            UserId::generate(),
            registration.name.as_str(),
            registration.email.as_str(),
            registration.username.as_str(),
            digest,
        );

        match self.users.insert(&user).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id(), "user registered");
                Ok(user.id().clone())
            }
            Err(UserRepositoryError::UsernameTaken) => Err(RegistrationError::UsernameTaken),
            Err(UserRepositoryError::EmailTaken) => Err(RegistrationError::EmailTaken),
            Err(error) => Err(RegistrationError::Service(error.into())),
        }
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, LoginError> {
        let user = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(Error::from)?
            .ok_or(LoginError::UnknownUsername)?;

        if !verify_password(user.password_digest(), credentials.password()).await? {
            tracing::debug!(user_id = %user.id(), "password rejected");
            return Err(LoginError::InvalidPassword);
        }
        Ok(user)
    }

    async fn current_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        Ok(self.users.find_by_id(id).await?)
    }
}
