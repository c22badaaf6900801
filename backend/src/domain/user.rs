//! Registered users and the author snapshot embedded in posts.

use serde::{Deserialize, Serialize};

use super::{PasswordDigest, UserId};

/// A registered account.
///
/// Name, email and username are stored exactly as submitted; registration
/// performs no format validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    username: String,
    password_digest: PasswordDigest,
}

impl User {
    /// Assemble a user from its parts.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        password_digest: PasswordDigest,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            username: username.into(),
            password_digest,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    /// Copy of the public fields, taken when the user writes a post.
    pub fn snapshot(&self) -> AuthorSnapshot {
        AuthorSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
        }
    }
}

/// Denormalised copy of a user stored inline with each post.
///
/// ## Invariants
/// - Reflects the author as of the last write to the post; later account
///   changes are not propagated.
/// - Never carries the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSnapshot {
    #[schema(value_type = String, example = "5f1d7c3a9b2e4f0012345678")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub username: String,
}
