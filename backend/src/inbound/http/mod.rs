//! HTTP inbound adapter: page handlers, session plumbing and probes.

pub mod accounts;
pub mod blogs;
pub mod current_user;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::ApiResult;
