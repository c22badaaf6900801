//! Authentication inputs and outcomes.
//!
//! Form values arrive untouched: the site performs no trimming, length or
//! format checks on credentials. Passwords are held in [`Zeroizing`] buffers
//! so they are wiped once the request is done with them.

use zeroize::Zeroizing;

use super::Error;

/// Username and password submitted to the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Fields submitted to the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub username: String,
    password: Zeroizing<String>,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Why a registration was refused.
///
/// The display strings are the messages shown on the re-rendered form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// Another account already uses the username. Checked before email.
    #[error("Username is taken.")]
    UsernameTaken,
    /// Another account already uses the email address.
    #[error("Email is taken.")]
    EmailTaken,
    /// Storage or hashing failed.
    #[error(transparent)]
    Service(#[from] Error),
}

/// Why a login was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// No account has the submitted username.
    #[error("Username is not correct")]
    UnknownUsername,
    /// The password does not verify against the stored digest.
    #[error("Invalid credentials")]
    InvalidPassword,
    /// Storage failed.
    #[error(transparent)]
    Service(#[from] Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_keep_whitespace() {
        let creds = LoginCredentials::new("  alice ", " pw ");
        assert_eq!(creds.username(), "  alice ");
        assert_eq!(creds.password(), " pw ");
    }

    #[test]
    fn refusal_messages_match_form_copy() {
        assert_eq!(RegistrationError::UsernameTaken.to_string(), "Username is taken.");
        assert_eq!(RegistrationError::EmailTaken.to_string(), "Email is taken.");
        assert_eq!(LoginError::UnknownUsername.to_string(), "Username is not correct");
        assert_eq!(LoginError::InvalidPassword.to_string(), "Invalid credentials");
    }
}
