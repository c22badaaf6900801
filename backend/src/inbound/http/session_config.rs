//! Session cookie settings read from the environment.
//!
//! Debug builds fall back to defaults (with a warning) for anything missing
//! or malformed and may sign cookies with a throwaway key. Release builds
//! require every toggle to be present and valid.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

mod parsing;

use parsing::{BoolEnv, debug_warn_or_error, parse_bool_env, parse_same_site};

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
pub(crate) const KEY_FILE_ENV: &str = "BLOG_SESSION_KEY_FILE";
pub(crate) const COOKIE_SECURE_ENV: &str = "BLOG_SESSION_COOKIE_SECURE";
pub(crate) const SAMESITE_ENV: &str = "BLOG_SESSION_SAMESITE";
pub(crate) const ALLOW_EPHEMERAL_ENV: &str = "BLOG_SESSION_ALLOW_EPHEMERAL";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie settings for the session middleware.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for the `currentUser` cookie.
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("key", &"<redacted>")
            .field("cookie_secure", &self.cookie_secure)
            .field("same_site", &self.same_site)
            .finish()
    }
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("BLOG_SESSION_SAMESITE=None requires BLOG_SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("BLOG_SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use blog::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = parse_bool_env(env, mode, BoolEnv::new(COOKIE_SECURE_ENV, true), Ok)?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = parse_bool_env(
        env,
        mode,
        BoolEnv::new(ALLOW_EPHEMERAL_ENV, false),
        |flag| {
            if flag && !mode.is_debug() {
                Err(SessionConfigError::EphemeralNotAllowed)
            } else {
                Ok(flag)
            }
        },
    )?;
    let key = session_key_from_env(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    match env.string(SAMESITE_ENV) {
        Some(value) => parse_same_site(value, mode, cookie_secure, fallback),
        None => debug_warn_or_error(
            mode,
            fallback,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("{SAMESITE_ENV} not set; using default"),
        ),
    }
}

fn session_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return debug_warn_or_error(
                    mode,
                    Key::generate(),
                    SessionConfigError::KeyTooShort {
                        path: path.clone(),
                        length,
                        min_len: SESSION_KEY_MIN_LEN,
                    },
                    || {
                        warn!(
                            path = %path.display(),
                            length,
                            "session key too short; using temporary key (dev only)"
                        );
                    },
                );
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}
