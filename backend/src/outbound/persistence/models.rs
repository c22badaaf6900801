//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them to
//! domain types before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{blogs, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub password_digest: String,
}

/// Row written to `users` at registration.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub username: &'a str,
    pub password_digest: &'a str,
}

/// Row read from `blogs`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blogs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BlogRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub author: serde_json::Value,
}

/// Row written to `blogs` when a post is created.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = blogs)]
pub(crate) struct NewBlogRow<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub author_id: &'a str,
    pub author: serde_json::Value,
}

/// Full replacement applied by an edit.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = blogs)]
pub(crate) struct BlogUpdate<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub author_id: &'a str,
    pub author: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
