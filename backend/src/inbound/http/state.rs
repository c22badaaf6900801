//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving
//! ports, so tests can swap in doubles without any I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, BlogService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub blog: Arc<dyn BlogService>,
}

impl HttpState {
    pub fn new(accounts: Arc<dyn AccountService>, blog: Arc<dyn BlogService>) -> Self {
        Self { accounts, blog }
    }
}
