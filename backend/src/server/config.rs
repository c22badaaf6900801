//! Server settings loaded via OrthoConfig.
//!
//! Values come from `BLOG_*` environment variables or the matching CLI
//! flags (`--port`, `--host`, `--database-url`).

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/blog";

/// Listener and storage settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct ServerSettings {
    /// Listening port.
    #[ortho_config(default = 5000)]
    pub port: u16,
    /// Bind host.
    pub host: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
}

impl ServerSettings {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Address handed to `HttpServer::bind`.
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host().to_owned(), self.port())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("blog")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("BLOG_PORT", None::<String>),
            ("BLOG_HOST", None::<String>),
            ("BLOG_DATABASE_URL", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.port(), 5000);
        assert_eq!(settings.host(), "0.0.0.0");
        assert_eq!(settings.database_url(), "postgres://localhost:5432/blog");
        assert_eq!(settings.bind_addr(), ("0.0.0.0".to_owned(), 5000));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BLOG_PORT", Some("8081".to_owned())),
            ("BLOG_HOST", Some("127.0.0.1".to_owned())),
            (
                "BLOG_DATABASE_URL",
                Some("postgres://db.internal:5432/blog".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.port, 8081);
        assert_eq!(settings.host(), "127.0.0.1");
        assert_eq!(settings.database_url(), "postgres://db.internal:5432/blog");
    }
}
