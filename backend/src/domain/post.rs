//! Blog posts.

use serde::Serialize;

use super::{AuthorSnapshot, PostId, User, UserId};

/// Title and body submitted from the composer or edit form.
///
/// Neither field is validated; empty titles and bodies are stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[schema(value_type = String)]
    pub id: PostId,
    pub title: String,
    pub content: String,
    #[schema(value_type = String)]
    pub author_id: UserId,
    pub author: AuthorSnapshot,
}

impl Post {
    /// Build a post written by `author` now.
    pub fn authored(id: PostId, author: &User, draft: PostDraft) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            author_id: author.id().clone(),
            author: author.snapshot(),
        }
    }

    /// Whether `user` is the recorded author.
    pub fn is_owned_by(&self, user: &User) -> bool {
        &self.author_id == user.id()
    }
}
