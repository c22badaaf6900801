//! Salted one-way password digests.
//!
//! Digests are Argon2 PHC strings with a random 16-byte salt. Verification
//! re-derives the digest from the candidate password; nothing is ever
//! decrypted.

use std::fmt;

use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

/// Failure while producing a digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordDigestError {
    /// The OS random source could not supply a salt.
    #[error("salt generation failed: {message}")]
    Salt { message: String },
    /// Argon2 rejected the input.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
}

/// Stored password digest in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash `password` with a fresh salt.
    pub fn generate(password: &str) -> Result<Self, PasswordDigestError> {
        let mut salt_bytes = [0_u8; 16];
        getrandom::getrandom(&mut salt_bytes).map_err(|err| PasswordDigestError::Salt {
            message: err.to_string(),
        })?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|err| PasswordDigestError::Salt {
            message: err.to_string(),
        })?;
        let phc = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordDigestError::Hash {
                message: err.to_string(),
            })?;
        Ok(Self(phc.to_string()))
    }

    /// Wrap a digest loaded from storage.
    pub fn from_stored(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Whether `password` hashes to this digest. Unparseable digests never
    /// verify.
    pub fn verify(&self, password: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(error) => {
                tracing::warn!(%error, "stored password digest is not a PHC string");
                false
            }
        }
    }

    /// PHC string for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_the_original_password_only() {
        let digest = PasswordDigest::generate("pw1").expect("hash");
        assert!(digest.verify("pw1"));
        assert!(!digest.verify("wrong"));
    }

    #[test]
    fn salts_make_digests_differ() {
        let first = PasswordDigest::generate("same").expect("hash");
        let second = PasswordDigest::generate("same").expect("hash");
        assert_ne!(first, second);
        assert!(!first.as_str().contains("same"));
    }

    #[test]
    fn garbage_digest_never_verifies() {
        let digest = PasswordDigest::from_stored("sha1$abc$def");
        assert!(!digest.verify("anything"));
    }

    #[test]
    fn debug_output_hides_digest() {
        let digest = PasswordDigest::generate("secret").expect("hash");
        assert_eq!(format!("{digest:?}"), "PasswordDigest(..)");
    }
}
