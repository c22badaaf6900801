//! Store-generated record identifiers.
//!
//! Users and posts are keyed by 24 lowercase hexadecimal characters: four
//! bytes of Unix seconds followed by eight random bytes. Parsing accepts
//! upper- or lowercase hex and normalises to lowercase; any other shape is
//! rejected before a repository is consulted.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Number of characters in a well-formed record id.
pub const RECORD_ID_LEN: usize = 24;

/// Reasons a raw string is not a record id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdError {
    /// Length differs from [`RECORD_ID_LEN`].
    #[error("record id must be {RECORD_ID_LEN} characters, got {length}")]
    WrongLength { length: usize },
    /// Contains a character outside `0-9a-fA-F`.
    #[error("record id must be hexadecimal")]
    NotHex,
}

fn parse_record_id(raw: &str) -> Result<String, RecordIdError> {
    let length = raw.chars().count();
    if length != RECORD_ID_LEN {
        return Err(RecordIdError::WrongLength { length });
    }
    if !raw.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(RecordIdError::NotHex);
    }
    Ok(raw.to_ascii_lowercase())
}

fn generate_record_id() -> String {
    // Truncation keeps the low 32 bits, which wraps in 2106.
    let seconds = Utc::now().timestamp() as u32;
    let tail: [u8; 8] = rand::random();
    let mut bytes = [0_u8; 12];
    bytes[..4].copy_from_slice(&seconds.to_be_bytes());
    bytes[4..].copy_from_slice(&tail);
    hex::encode(bytes)
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate a raw id taken from a URL, form or storage row.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, RecordIdError> {
                parse_record_id(raw.as_ref()).map(Self)
            }

            /// Mint a fresh id.
            pub fn generate() -> Self {
                Self(generate_record_id())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = RecordIdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

record_id! {
    /// Identifier of a registered user.
    ///
    /// # Examples
    /// ```
    /// use blog::domain::UserId;
    ///
    /// assert!(UserId::new("5f1d7c3a9b2e4f0012345678").is_ok());
    /// assert!(UserId::new("notanid").is_err());
    /// ```
    UserId
}

record_id! {
    /// Identifier of a blog post.
    PostId
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", RecordIdError::WrongLength { length: 0 })]
    #[case("notanid", RecordIdError::WrongLength { length: 7 })]
    #[case("5f1d7c3a9b2e4f00123456789", RecordIdError::WrongLength { length: 25 })]
    #[case("5f1d7c3a9b2e4f001234567z", RecordIdError::NotHex)]
    #[case("5f1d7c3a9b2e4f00 1234567", RecordIdError::NotHex)]
    fn rejects_malformed_ids(#[case] raw: &str, #[case] expected: RecordIdError) {
        assert_eq!(PostId::new(raw), Err(expected));
    }

    #[test]
    fn normalises_uppercase_hex() {
        let id = UserId::new("5F1D7C3A9B2E4F0012345678").expect("hex id");
        assert_eq!(id.as_ref(), "5f1d7c3a9b2e4f0012345678");
    }

    #[test]
    fn generated_ids_are_well_formed_and_distinct() {
        let first = PostId::generate();
        let second = PostId::generate();
        assert_eq!(first.as_ref().len(), RECORD_ID_LEN);
        assert!(PostId::new(first.as_ref()).is_ok());
        assert_ne!(first, second);
    }

    #[test]
    fn generated_ids_lead_with_creation_time() {
        let before = Utc::now().timestamp() as u32;
        let id = UserId::generate();
        let prefix = u32::from_str_radix(&id.as_ref()[..8], 16).expect("hex prefix");
        assert!(prefix >= before);
    }

    #[test]
    fn deserialising_validates_shape() {
        let err = serde_json::from_str::<UserId>("\"short\"");
        assert!(err.is_err());
    }
}
