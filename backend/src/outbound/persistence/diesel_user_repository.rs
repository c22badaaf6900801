//! PostgreSQL-backed `UserRepository`.
//!
//! Username and email uniqueness is enforced by the `users_username_unique`
//! and `users_email_unique` constraints, so concurrent registrations race
//! on the insert itself and exactly one wins.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{PasswordDigest, User, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error, unique_violation};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERNAME_CONSTRAINT: &str = "users_username_unique";
const EMAIL_CONSTRAINT: &str = "users_email_unique";

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, UserRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let id = UserId::new(&row.id).map_err(|err| {
        tracing::warn!(stored_id = %row.id, error = %err, "malformed user id in storage");
        UserRepositoryError::query("stored user id is malformed")
    })?;
    Ok(User::new(
        id,
        row.name,
        row.email,
        row.username,
        PasswordDigest::from_stored(row.password_digest),
    ))
}

impl DieselUserRepository {
    /// Work out which field clashed, preferring the username.
    async fn classify_conflict(&self, user: &User, constraint: &str) -> UserRepositoryError {
        if constraint == USERNAME_CONSTRAINT {
            return UserRepositoryError::username_taken();
        }
        match self.find_by_username(user.username()).await {
            Ok(Some(_)) => UserRepositoryError::username_taken(),
            Ok(None) if constraint == EMAIL_CONSTRAINT => UserRepositoryError::email_taken(),
            Ok(None) => {
                UserRepositoryError::query(format!("unexpected unique violation: {constraint}"))
            }
            Err(error) => error,
        }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserRow {
            id: user.id().as_ref(),
            name: user.name(),
            email: user.email(),
            username: user.username(),
            password_digest: user.password_digest().as_str(),
        };

        let outcome = diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await;
        drop(conn);

        match outcome {
            Ok(_) => Ok(()),
            Err(error) => match unique_violation(&error) {
                Some(constraint) => {
                    let constraint = constraint.to_owned();
                    tracing::debug!(%constraint, "registration hit unique constraint");
                    Err(self.classify_conflict(user, &constraint).await)
                }
                None => Err(diesel_error(error)),
            },
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rows_convert_to_users() {
        let row = UserRow {
            id: "5F1D7C3A9B2E4F0012345678".into(),
            name: "Alice".into(),
            email: "a@x.com".into(),
            username: "alice".into(),
            password_digest: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
        };
        let user = row_to_user(row).expect("valid row");
        assert_eq!(user.id().as_ref(), "5f1d7c3a9b2e4f0012345678");
        assert_eq!(user.username(), "alice");
    }

    #[rstest]
    fn malformed_stored_ids_are_query_errors() {
        let row = UserRow {
            id: "42".into(),
            name: String::new(),
            email: String::new(),
            username: String::new(),
            password_digest: String::new(),
        };
        let err = row_to_user(row).expect_err("bad id");
        assert!(matches!(err, UserRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let err = pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, UserRepositoryError::Connection { .. }));
    }
}
