//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel.
//! - **memory**: lock-guarded in-process repositories.
//!
//! Adapters translate between storage representations and domain types and
//! contain no business rules.

pub mod memory;
pub mod persistence;
