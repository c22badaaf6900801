//! Post use-cases with per-post ownership checks.
//!
//! Raw identifiers are validated here, before any repository call, and a
//! malformed id is reported exactly like an unknown one.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{BlogService, PostRepository, UserRepository};
use crate::domain::{Error, Post, PostDraft, PostId, User, UserId};

/// Shown when a post id is malformed or unknown.
pub const POST_NOT_FOUND_MESSAGE: &str = "There is no blog posted that matches that query";
/// Shown when a user id is malformed or unknown.
pub const USER_NOT_FOUND_MESSAGE: &str = "There is no user registered that matches that query";
/// Shown when someone other than the author tries to change a post.
pub const NOT_AUTHOR_MESSAGE: &str = "You do not have permission to modify this blog post.";

/// A user together with every post they wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    pub posts: Vec<Post>,
}

/// [`BlogService`] backed by user and post repositories.
#[derive(Clone)]
pub struct BlogServiceImpl<U, P> {
    users: Arc<U>,
    posts: Arc<P>,
}

impl<U, P> BlogServiceImpl<U, P> {
    pub fn new(users: Arc<U>, posts: Arc<P>) -> Self {
        Self { users, posts }
    }
}

fn parse_post_id(raw: &str) -> Result<PostId, Error> {
    PostId::new(raw).map_err(|err| {
        tracing::debug!(error = %err, "rejected post id");
        Error::not_found(POST_NOT_FOUND_MESSAGE)
    })
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| {
        tracing::debug!(error = %err, "rejected user id");
        Error::not_found(USER_NOT_FOUND_MESSAGE)
    })
}

impl<U, P> BlogServiceImpl<U, P>
where
    U: UserRepository,
    P: PostRepository,
{
    async fn find_post(&self, id: &PostId) -> Result<Post, Error> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(POST_NOT_FOUND_MESSAGE))
    }

    async fn owned_post(&self, editor: &User, raw_id: &str) -> Result<Post, Error> {
        let id = parse_post_id(raw_id)?;
        let post = self.find_post(&id).await?;
        if !post.is_owned_by(editor) {
            tracing::warn!(user_id = %editor.id(), post_id = %id, "edit refused for non-author");
            return Err(Error::forbidden(NOT_AUTHOR_MESSAGE));
        }
        Ok(post)
    }
}

#[async_trait]
impl<U, P> BlogService for BlogServiceImpl<U, P>
where
    U: UserRepository,
    P: PostRepository,
{
    async fn create_post(&self, author: &User, draft: PostDraft) -> Result<PostId, Error> {
        let post = Post::authored(PostId::generate(), author, draft);
        self.posts.insert(&post).await?;
        tracing::info!(user_id = %author.id(), post_id = %post.id, "post created");
        Ok(post.id)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, Error> {
        Ok(self.posts.list_all().await?)
    }

    async fn get_post(&self, raw_id: &str) -> Result<Post, Error> {
        let id = parse_post_id(raw_id)?;
        self.find_post(&id).await
    }

    async fn user_profile(&self, raw_id: &str) -> Result<UserProfile, Error> {
        let id = parse_user_id(raw_id)?;
        let user = self
            .users
            .find_by_id(&id)
            .await?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))?;
        let posts = self.posts.list_by_author(&id).await?;
        Ok(UserProfile { user, posts })
    }

    async fn prepare_update(&self, editor: &User, raw_id: &str) -> Result<Post, Error> {
        self.owned_post(editor, raw_id).await
    }

    async fn apply_update(
        &self,
        editor: &User,
        raw_id: &str,
        draft: PostDraft,
    ) -> Result<(), Error> {
        let existing = self.owned_post(editor, raw_id).await?;
        let updated = Post::authored(existing.id, editor, draft);
        if !self.posts.replace(&updated).await? {
            return Err(Error::not_found(POST_NOT_FOUND_MESSAGE));
        }
        tracing::info!(user_id = %editor.id(), post_id = %updated.id, "post updated");
        Ok(())
    }

    async fn delete_post(&self, owner: &User, raw_id: &str) -> Result<(), Error> {
        let id = parse_post_id(raw_id)?;
        let Some(post) = self.posts.find_by_id(&id).await? else {
            tracing::debug!(post_id = %id, "delete of missing post ignored");
            return Ok(());
        };
        if !post.is_owned_by(owner) {
            tracing::warn!(user_id = %owner.id(), post_id = %id, "delete refused for non-author");
            return Err(Error::forbidden(NOT_AUTHOR_MESSAGE));
        }
        let removed = self.posts.delete(&id).await?;
        tracing::info!(user_id = %owner.id(), post_id = %id, removed, "post deleted");
        Ok(())
    }
}
