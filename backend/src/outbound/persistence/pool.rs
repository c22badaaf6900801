//! Shared `bb8` pool of async PostgreSQL connections.
//!
//! Every repository call checks a connection out for the duration of one
//! query and returns it afterwards. A checkout that cannot complete within
//! the configured timeout surfaces as [`PoolError::Checkout`], which the
//! repositories report as an unreachable store.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Failures raised while building or using the pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available in time.
    #[error("connection checkout failed: {message}")]
    Checkout { message: String },
    /// The pool could not be created.
    #[error("connection pool setup failed: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Message without the variant prefix.
    pub fn into_message(self) -> String {
        match self {
            Self::Checkout { message } | Self::Build { message } => message,
        }
    }
}

/// Pool sizing and timeouts.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use blog::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost:5432/blog")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Ten connections and a thirty second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            connection_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }
}

/// Cloneable handle to the connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool. Connections are opened lazily on first checkout, so
    /// an unreachable server is reported per request rather than here.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(0))
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Check out a connection.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
