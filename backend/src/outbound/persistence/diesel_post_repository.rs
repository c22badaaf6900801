//! PostgreSQL-backed `PostRepository`.
//!
//! The author snapshot lives in the `author` JSONB column and is rewritten
//! wholesale on every replace.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{AuthorSnapshot, Post, PostId, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BlogRow, BlogUpdate, NewBlogRow};
use super::pool::{DbPool, PoolError};
use super::schema::blogs;

/// Diesel implementation of [`PostRepository`].
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PostRepositoryError {
    map_pool_error(error, PostRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

fn author_json(author: &AuthorSnapshot) -> Result<serde_json::Value, PostRepositoryError> {
    serde_json::to_value(author)
        .map_err(|err| PostRepositoryError::query(format!("author snapshot encoding: {err}")))
}

fn row_to_post(row: BlogRow) -> Result<Post, PostRepositoryError> {
    let id = PostId::new(&row.id).map_err(|err| {
        tracing::warn!(stored_id = %row.id, error = %err, "malformed post id in storage");
        PostRepositoryError::query("stored post id is malformed")
    })?;
    let author_id = UserId::new(&row.author_id)
        .map_err(|_| PostRepositoryError::query("stored author id is malformed"))?;
    let author: AuthorSnapshot = serde_json::from_value(row.author).map_err(|err| {
        tracing::warn!(post_id = %id, error = %err, "unreadable author snapshot");
        PostRepositoryError::query("stored author snapshot is malformed")
    })?;
    Ok(Post {
        id,
        title: row.title,
        content: row.content,
        author_id,
        author,
    })
}

fn rows_to_posts(rows: Vec<BlogRow>) -> Result<Vec<Post>, PostRepositoryError> {
    rows.into_iter().map(row_to_post).collect()
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let row = NewBlogRow {
            id: post.id.as_ref(),
            title: &post.title,
            content: &post.content,
            author_id: post.author_id.as_ref(),
            author: author_json(&post.author)?,
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(blogs::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<BlogRow> = blogs::table
            .order((blogs::created_at.asc(), blogs::id.asc()))
            .select(BlogRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_posts(rows)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<BlogRow> = blogs::table
            .filter(blogs::id.eq(id.as_ref()))
            .select(BlogRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_post).transpose()
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<BlogRow> = blogs::table
            .filter(blogs::author_id.eq(author.as_ref()))
            .order((blogs::created_at.asc(), blogs::id.asc()))
            .select(BlogRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_posts(rows)
    }

    async fn replace(&self, post: &Post) -> Result<bool, PostRepositoryError> {
        let update = BlogUpdate {
            title: &post.title,
            content: &post.content,
            author_id: post.author_id.as_ref(),
            author: author_json(&post.author)?,
            updated_at: Utc::now(),
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changed = diesel::update(blogs::table.filter(blogs::id.eq(post.id.as_ref())))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(changed > 0)
    }

    async fn delete(&self, id: &PostId) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(blogs::table.filter(blogs::id.eq(id.as_ref())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn row(author: serde_json::Value) -> BlogRow {
        BlogRow {
            id: "5f1d7c3a9b2e4f0012345678".into(),
            title: "Hello".into(),
            content: "World".into(),
            author_id: "5f1d7c3a9b2e4f00aaaaaaaa".into(),
            author,
        }
    }

    #[rstest]
    fn rows_convert_with_author_snapshot() {
        let post = row_to_post(row(json!({
            "id": "5f1d7c3a9b2e4f00aaaaaaaa",
            "name": "Alice",
            "email": "a@x.com",
            "username": "alice",
        })))
        .expect("valid row");
        assert_eq!(post.author.username, "alice");
        assert_eq!(post.author.id, post.author_id);
    }

    #[rstest]
    fn unreadable_snapshots_are_query_errors() {
        let err = row_to_post(row(json!({"name": "Alice"}))).expect_err("bad snapshot");
        assert!(matches!(err, PostRepositoryError::Query { .. }));
    }
}
