//! Value parsing for session toggles.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean toggle and the value debug builds fall back to.
pub(super) struct BoolEnv {
    name: &'static str,
    fallback: bool,
}

impl BoolEnv {
    pub(super) const fn new(name: &'static str, fallback: bool) -> Self {
        Self { name, fallback }
    }
}

/// Read a boolean toggle, passing parsed values through `accept`.
pub(super) fn parse_bool_env<E, F>(
    env: &E,
    mode: BuildMode,
    toggle: BoolEnv,
    accept: F,
) -> Result<bool, SessionConfigError>
where
    E: Env,
    F: FnOnce(bool) -> Result<bool, SessionConfigError>,
{
    let BoolEnv { name, fallback } = toggle;
    match env.string(name) {
        Some(value) => match parse_bool(&value) {
            Some(flag) => accept(flag),
            None => {
                let shown = value.clone();
                debug_warn_or_error(
                    mode,
                    fallback,
                    SessionConfigError::InvalidEnv {
                        name,
                        value,
                        expected: BOOL_EXPECTED,
                    },
                    || warn!(value = %shown, "invalid {name}; defaulting to {fallback}"),
                )
            }
        },
        None => debug_warn_or_error(
            mode,
            fallback,
            SessionConfigError::MissingEnv { name },
            || warn!("{name} not set; defaulting to {fallback}"),
        ),
    }
}

/// Fall back with a warning in debug builds, fail in release builds.
pub(super) fn debug_warn_or_error<T, F>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: F,
) -> Result<T, SessionConfigError>
where
    F: FnOnce(),
{
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn parse_same_site(
    value: String,
    mode: BuildMode,
    cookie_secure: bool,
    fallback: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => debug_warn_or_error(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("{SAMESITE_ENV}=None without a secure cookie; browsers may drop it"),
        ),
        _ => {
            let shown = value.clone();
            debug_warn_or_error(
                mode,
                fallback,
                SessionConfigError::InvalidEnv {
                    name: SAMESITE_ENV,
                    value,
                    expected: SAMESITE_EXPECTED,
                },
                || warn!(value = %shown, "invalid {SAMESITE_ENV}, using default"),
            )
        }
    }
}

pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
