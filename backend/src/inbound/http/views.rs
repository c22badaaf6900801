//! Page view models.
//!
//! The site's pages are described as JSON documents naming the template to
//! render, the signed-in user (if any) and the template context. Lookup
//! failures and ownership refusals are plain-text notices served with
//! status 200.

use actix_web::HttpResponse;
use actix_web::http::header::{ContentType, LOCATION};
use serde::Serialize;
use serde_json::Value;

use crate::domain::{AuthorSnapshot, User};

/// A rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    /// Template name, e.g. `blogs` or `login`.
    #[schema(value_type = String, example = "blogs")]
    pub template: &'static str,
    /// Public fields of the signed-in user, `null` when anonymous.
    pub current_user: Option<AuthorSnapshot>,
    /// Template context.
    #[schema(value_type = Object)]
    pub context: Value,
}

impl PageView {
    pub fn new(template: &'static str, current_user: Option<&User>, context: Value) -> Self {
        Self {
            template,
            current_user: current_user.map(User::snapshot),
            context,
        }
    }

    /// Serve the view with status 200.
    pub fn respond(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

/// Plain-text message served with status 200.
pub fn notice(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(message.into())
}

/// `303 See Other` pointing at `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}
