//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every page handler, the delete endpoint and the
//! health probes, together with the form and view schemas they exchange.
//! Restricted operations reference the `SessionCookie` scheme, which names
//! the `currentUser` cookie issued by `POST /login`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{AuthorSnapshot, Post};
use crate::inbound::http::accounts::{LoginForm, RegisterForm};
use crate::inbound::http::blogs::PostForm;
use crate::inbound::http::session::SESSION_COOKIE_NAME;
use crate::inbound::http::views::PageView;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the site.
/// Swagger UI serves it in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blog API",
        description = "Pages and endpoints of a minimal multi-user blog."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::index,
        crate::inbound::http::accounts::login_page,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::register_page,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::blogs::list_blogs,
        crate::inbound::http::blogs::compose_page,
        crate::inbound::http::blogs::create_blog,
        crate::inbound::http::blogs::user_profile,
        crate::inbound::http::blogs::show_blog,
        crate::inbound::http::blogs::edit_page,
        crate::inbound::http::blogs::update_blog,
        crate::inbound::http::blogs::delete_blog,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(PageView, LoginForm, RegisterForm, PostForm, AuthorSnapshot, Post)),
    tags(
        (name = "accounts", description = "Registration, login and logout"),
        (name = "blogs", description = "Posts and profiles"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        match schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            Some(_) => panic!("expected an inline object schema for {name}"),
            None => panic!("schema {name} is not registered"),
        }
    }

    #[rstest]
    #[case("PageView", &["template", "currentUser", "context"])]
    #[case("AuthorSnapshot", &["id", "name", "email", "username"])]
    #[case("Post", &["id", "title", "content", "authorId", "author"])]
    #[case("PostForm", &["title", "content", "blogId"])]
    fn schemas_use_wire_field_names(#[case] name: &str, #[case] fields: &[&str]) {
        let present = schema_fields(name);
        for field in fields {
            assert!(present.iter().any(|p| p == field), "{name} lacks {field}");
        }
    }

    #[test]
    fn author_snapshot_has_no_digest() {
        let present = schema_fields("AuthorSnapshot");
        assert!(!present.iter().any(|p| p.contains("password")));
    }

    #[rstest]
    #[case("/")]
    #[case("/login")]
    #[case("/register")]
    #[case("/logout")]
    #[case("/blogs")]
    #[case("/post")]
    #[case("/user/{id}")]
    #[case("/blog/{id}")]
    #[case("/update/{id}")]
    #[case("/api/delete-blog")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn session_cookie_scheme_names_the_cookie() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        let scheme = components
            .security_schemes
            .get("SessionCookie")
            .expect("SessionCookie scheme");
        let rendered = serde_json::to_value(scheme).expect("json");
        assert_eq!(rendered["in"], "cookie");
        assert_eq!(rendered["name"], SESSION_COOKIE_NAME);
    }
}
