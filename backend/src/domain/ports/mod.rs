//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `PostRepository`) are implemented by
//! outbound adapters. Driving ports (`AccountService`, `BlogService`) are
//! called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod blog_service;
mod post_repository;
mod user_repository;

pub use account_service::AccountService;
#[cfg(test)]
pub use account_service::MockAccountService;
pub use blog_service::BlogService;
#[cfg(test)]
pub use blog_service::MockBlogService;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
