//! In-process repositories.
//!
//! Used by the HTTP flow tests and for running the server without a
//! database. The user store checks uniqueness and inserts under a single
//! lock, giving the same guarantee as the PostgreSQL constraints.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    PostRepository, PostRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{Post, PostId, User, UserId};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Users kept in registration order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        lock(&self.users).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = lock(&self.users);
        if users.iter().any(|u| u.username() == user.username()) {
            return Err(UserRepositoryError::username_taken());
        }
        if users.iter().any(|u| u.email() == user.email()) {
            return Err(UserRepositoryError::email_taken());
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.users).iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.users)
            .iter()
            .find(|u| u.username() == username)
            .cloned())
    }
}

/// Posts kept in creation order.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let mut posts = lock(&self.posts);
        if posts.iter().any(|p| p.id == post.id) {
            return Err(PostRepositoryError::query("duplicate post id"));
        }
        posts.push(post.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError> {
        Ok(lock(&self.posts).clone())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        Ok(lock(&self.posts).iter().find(|p| &p.id == id).cloned())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostRepositoryError> {
        Ok(lock(&self.posts)
            .iter()
            .filter(|p| &p.author_id == author)
            .cloned()
            .collect())
    }

    async fn replace(&self, post: &Post) -> Result<bool, PostRepositoryError> {
        let mut posts = lock(&self.posts);
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => {
                *slot = post.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &PostId) -> Result<bool, PostRepositoryError> {
        let mut posts = lock(&self.posts);
        let before = posts.len();
        posts.retain(|p| &p.id != id);
        Ok(posts.len() != before)
    }
}
