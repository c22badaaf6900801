//! Driving port for post use-cases.
//!
//! Identifiers arrive as raw strings from paths and query parameters; the
//! service owns the shape check so every inbound adapter reports malformed
//! ids the same way.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostDraft, PostId, User, UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogService: Send + Sync {
    /// Publish a post by `author`.
    async fn create_post(&self, author: &User, draft: PostDraft) -> Result<PostId, Error>;

    /// All posts, unordered.
    async fn list_posts(&self) -> Result<Vec<Post>, Error>;

    /// A single post. `NotFound` for malformed or unknown ids.
    async fn get_post(&self, raw_id: &str) -> Result<Post, Error>;

    /// A user and the posts they wrote. `NotFound` for malformed or unknown
    /// ids.
    async fn user_profile(&self, raw_id: &str) -> Result<UserProfile, Error>;

    /// The post `editor` wants to edit. `NotFound` when absent, `Forbidden`
    /// when someone else wrote it.
    async fn prepare_update(&self, editor: &User, raw_id: &str) -> Result<Post, Error>;

    /// Replace the post's title and content, re-stamping the author.
    async fn apply_update(&self, editor: &User, raw_id: &str, draft: PostDraft)
    -> Result<(), Error>;

    /// Remove a post owned by `owner`. Missing posts are not an error.
    async fn delete_post(&self, owner: &User, raw_id: &str) -> Result<(), Error>;
}
