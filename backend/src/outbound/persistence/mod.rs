//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel row structs and domain
//! types, sharing one `bb8` pool of `diesel-async` connections. Row structs
//! and table definitions stay private to this module.
//!
//! ```ignore
//! use blog::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost:5432/blog")).await?;
//! let users = DieselUserRepository::new(pool.clone());
//! ```

mod diesel_basic_error_mapping;
mod diesel_post_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
