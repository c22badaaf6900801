//! Driven port for the content store.
use async_trait::async_trait;

use crate::domain::{Error, Post, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by post repository adapters.
    pub enum PostRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "post repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

impl From<PostRepositoryError> for Error {
    fn from(value: PostRepositoryError) -> Self {
        match value {
            PostRepositoryError::Connection { message } => Error::service_unavailable(message),
            other @ PostRepositoryError::Query { .. } => Error::internal(other.to_string()),
        }
    }
}

/// Persistence for blog posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Store a new post.
    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError>;

    /// Every stored post, in whatever order the store yields them.
    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// Posts whose author id equals `author`.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostRepositoryError>;

    /// Overwrite title, content, author id and author snapshot of the post
    /// with the same id. Returns `false` when no such post exists.
    async fn replace(&self, post: &Post) -> Result<bool, PostRepositoryError>;

    /// Remove a post. Returns `false` when no such post exists.
    async fn delete(&self, id: &PostId) -> Result<bool, PostRepositoryError>;
}
