//! Embedded schema migrations applied at startup.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failure while bringing the schema up to date.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("migration connection failed: {0}")]
    Connection(String),
    #[error("migration failed: {0}")]
    Apply(String),
    #[error("migration task aborted: {0}")]
    Task(String),
}

fn apply_pending(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| MigrationError::Connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply(err.to_string()))?;
    Ok(applied.len())
}

/// Apply every pending migration. Runs on the blocking pool because the
/// migration harness needs a synchronous connection.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_pending(&url))
        .await
        .map_err(|err| MigrationError::Task(err.to_string()))??;
    tracing::info!(applied, "database schema up to date");
    Ok(())
}
