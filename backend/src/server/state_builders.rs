//! Builders wiring repositories into the services behind [`HttpState`].

use std::sync::Arc;

use crate::domain::ports::{PostRepository, UserRepository};
use crate::domain::{AccountServiceImpl, BlogServiceImpl};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryPostRepository, InMemoryUserRepository};
use crate::outbound::persistence::{DbPool, DieselPostRepository, DieselUserRepository};

/// Build both services over one pair of repositories.
pub fn http_state_with<U, P>(users: Arc<U>, posts: Arc<P>) -> HttpState
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
{
    let accounts = Arc::new(AccountServiceImpl::new(users.clone()));
    let blog = Arc::new(BlogServiceImpl::new(users, posts));
    HttpState::new(accounts, blog)
}

/// PostgreSQL-backed state.
pub fn diesel_http_state(pool: &DbPool) -> HttpState {
    http_state_with(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselPostRepository::new(pool.clone())),
    )
}

/// Process-local state for tests and local runs without a database.
pub fn in_memory_http_state() -> HttpState {
    http_state_with(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryPostRepository::new()),
    )
}
