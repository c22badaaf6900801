//! Post pages and the delete endpoint.
//!
//! ```text
//! GET    /blogs                    all posts
//! GET    /post                     composer
//! POST   /post                     {"title":"Hello","content":"World"}
//! GET    /user/{id}                profile and authored posts
//! GET    /blog/{id}                single post
//! GET    /update/{id}              edit form
//! POST   /update/{id}              {"title":"Hello","content":"Edited"}
//! DELETE /api/delete-blog?blogId=…&userId=…
//! ```
//!
//! Lookup failures and ownership refusals on pages are plain-text notices
//! with status 200; the delete endpoint reports them as status codes.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, ErrorCode, PostDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::{FormOrJson, form_inner};
use crate::inbound::http::current_user::{CurrentUser, SignedIn};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{PageView, notice, see_other};

/// Composer and edit form fields.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostForm {
    pub title: String,
    pub content: String,
    /// Sent by the edit form; the path id is authoritative.
    #[serde(default)]
    pub blog_id: Option<String>,
}

impl From<PostForm> for PostDraft {
    fn from(value: PostForm) -> Self {
        PostDraft::new(value.title, value.content)
    }
}

/// Query string of the delete endpoint.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DeleteBlogQuery {
    /// Id of the post to remove.
    #[serde(default)]
    pub blog_id: String,
    /// Accepted for compatibility; ownership comes from the session.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Turn page-level lookup and ownership failures into notices; anything
/// else aborts the request.
fn page_or_notice(result: Result<HttpResponse, Error>) -> ApiResult<HttpResponse> {
    match result {
        Ok(response) => Ok(response),
        Err(error) if matches!(error.code(), ErrorCode::NotFound | ErrorCode::Forbidden) => {
            Ok(notice(error.message()))
        }
        Err(error) => Err(error),
    }
}

/// Every post.
#[utoipa::path(
    get,
    path = "/blogs",
    responses(
        (status = 200, description = "Posts page", body = PageView),
        (status = 302, description = "Anonymous, redirect to /login")
    ),
    tags = ["blogs"],
    operation_id = "listBlogs",
    security(("SessionCookie" = []))
)]
#[get("/blogs")]
pub async fn list_blogs(
    state: web::Data<HttpState>,
    SignedIn(user): SignedIn,
) -> ApiResult<HttpResponse> {
    let posts = state.blog.list_posts().await?;
    Ok(PageView::new("blogs", Some(&user), json!({ "blogs": posts })).respond())
}

/// Composer.
#[utoipa::path(
    get,
    path = "/post",
    responses(
        (status = 200, description = "Composer page", body = PageView),
        (status = 302, description = "Anonymous, redirect to /login")
    ),
    tags = ["blogs"],
    operation_id = "composePage",
    security(("SessionCookie" = []))
)]
#[get("/post")]
pub async fn compose_page(SignedIn(user): SignedIn) -> HttpResponse {
    PageView::new("post", Some(&user), json!({})).respond()
}

/// Publish a post.
#[utoipa::path(
    post,
    path = "/post",
    request_body(content = PostForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirect to /blogs"),
        (status = 302, description = "Anonymous, redirect to /login")
    ),
    tags = ["blogs"],
    operation_id = "createBlog",
    security(("SessionCookie" = []))
)]
#[post("/post")]
pub async fn create_blog(
    state: web::Data<HttpState>,
    SignedIn(user): SignedIn,
    payload: FormOrJson<PostForm>,
) -> ApiResult<HttpResponse> {
    state
        .blog
        .create_post(&user, form_inner(payload).into())
        .await?;
    Ok(see_other("/blogs"))
}

/// A user's profile and posts.
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = String, Path, description = "24-character user id")),
    responses(
        (status = 200, description = "Profile page, or a plain-text notice for unknown ids", body = PageView),
        (status = 302, description = "Anonymous, redirect to /login")
    ),
    tags = ["blogs"],
    operation_id = "userProfile",
    security(("SessionCookie" = []))
)]
#[get("/user/{id}")]
pub async fn user_profile(
    state: web::Data<HttpState>,
    SignedIn(viewer): SignedIn,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let result = state.blog.user_profile(&path).await.map(|profile| {
        PageView::new(
            "user",
            Some(&viewer),
            json!({ "user": profile.user.snapshot(), "blogs": profile.posts }),
        )
        .respond()
    });
    page_or_notice(result)
}

/// A single post. Public.
#[utoipa::path(
    get,
    path = "/blog/{id}",
    params(("id" = String, Path, description = "24-character post id")),
    responses(
        (status = 200, description = "Post page, or a plain-text notice for unknown ids", body = PageView)
    ),
    tags = ["blogs"],
    operation_id = "showBlog"
)]
#[get("/blog/{id}")]
pub async fn show_blog(
    state: web::Data<HttpState>,
    current: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let result = state.blog.get_post(&path).await.map(|post| {
        PageView::new("blog", current.user(), json!({ "blog": post })).respond()
    });
    page_or_notice(result)
}

/// Edit form for a post the viewer wrote.
#[utoipa::path(
    get,
    path = "/update/{id}",
    params(("id" = String, Path, description = "24-character post id")),
    responses(
        (status = 200, description = "Edit page, or a plain-text notice", body = PageView),
        (status = 302, description = "Anonymous, redirect to /login")
    ),
    tags = ["blogs"],
    operation_id = "editPage",
    security(("SessionCookie" = []))
)]
#[get("/update/{id}")]
pub async fn edit_page(
    state: web::Data<HttpState>,
    SignedIn(user): SignedIn,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let result = state.blog.prepare_update(&user, &path).await.map(|post| {
        PageView::new("update", Some(&user), json!({ "blog": post })).respond()
    });
    page_or_notice(result)
}

/// Replace a post's title and content.
#[utoipa::path(
    post,
    path = "/update/{id}",
    params(("id" = String, Path, description = "24-character post id")),
    request_body(content = PostForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirect to /"),
        (status = 200, description = "Plain-text notice for unknown or foreign posts", body = String),
        (status = 302, description = "Anonymous, redirect to /login")
    ),
    tags = ["blogs"],
    operation_id = "updateBlog",
    security(("SessionCookie" = []))
)]
#[post("/update/{id}")]
pub async fn update_blog(
    state: web::Data<HttpState>,
    SignedIn(user): SignedIn,
    path: web::Path<String>,
    payload: FormOrJson<PostForm>,
) -> ApiResult<HttpResponse> {
    let draft = PostDraft::from(form_inner(payload));
    let result = state
        .blog
        .apply_update(&user, &path, draft)
        .await
        .map(|()| see_other("/"));
    page_or_notice(result)
}

/// Remove a post the caller wrote.
#[utoipa::path(
    delete,
    path = "/api/delete-blog",
    params(DeleteBlogQuery),
    responses(
        (status = 204, description = "Deleted, or already absent"),
        (status = 401, description = "No session", body = String),
        (status = 403, description = "Caller is not the author", body = String),
        (status = 404, description = "Malformed post id", body = String),
        (status = 503, description = "Store unavailable", body = String)
    ),
    tags = ["blogs"],
    operation_id = "deleteBlog",
    security(("SessionCookie" = []))
)]
#[delete("/api/delete-blog")]
pub async fn delete_blog(
    state: web::Data<HttpState>,
    current: CurrentUser,
    query: web::Query<DeleteBlogQuery>,
) -> ApiResult<HttpResponse> {
    let user = current.require()?;
    let query = query.into_inner();
    if query.user_id.is_some() {
        tracing::debug!(user_id = %user.id(), "ignoring userId query parameter");
    }
    state.blog.delete_post(&user, &query.blog_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
