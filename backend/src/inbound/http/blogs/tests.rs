//! Handler tests for post pages and the delete endpoint.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{App, test};
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::Value;

use super::*;
use crate::domain::blog_service::{NOT_AUTHOR_MESSAGE, POST_NOT_FOUND_MESSAGE};
use crate::domain::ports::{MockAccountService, MockBlogService};
use crate::domain::{PasswordDigest, Post, PostId, User, UserId};
use crate::inbound::http::session::{SESSION_COOKIE_NAME, SessionContext};
use crate::inbound::http::test_utils::test_session_middleware;

const ALICE_ID: &str = "5f1d7c3a9b2e4f0012345678";
const POST_ID: &str = "5f1d7c3a9b2e4f00aaaaaaaa";

#[fixture]
fn alice() -> User {
    User::new(
        UserId::new(ALICE_ID).expect("fixture id"),
        "Alice",
        "a@x.com",
        "alice",
        PasswordDigest::from_stored("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
    )
}

fn post_by(author: &User) -> Post {
    Post::authored(
        PostId::new(POST_ID).expect("fixture id"),
        author,
        PostDraft::new("Hello", "World"),
    )
}

/// Accounts double that resolves every session to `user`.
fn accounts_resolving(user: Option<User>) -> MockAccountService {
    let mut accounts = MockAccountService::new();
    accounts
        .expect_current_user()
        .returning(move |_| Ok(user.clone()));
    accounts
}

async fn sign_in(session: SessionContext) -> ApiResult<HttpResponse> {
    session.persist_user(&UserId::new(ALICE_ID).expect("fixture id"))?;
    Ok(HttpResponse::Ok().finish())
}

macro_rules! blogs_app {
    ($accounts:expr, $blog:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::new(
                    Arc::new($accounts),
                    Arc::new($blog),
                )))
                .wrap(test_session_middleware())
                .route("/test/sign-in", web::get().to(sign_in))
                .service(list_blogs)
                .service(compose_page)
                .service(create_blog)
                .service(user_profile)
                .service(show_blog)
                .service(edit_page)
                .service(update_blog)
                .service(delete_blog),
        )
        .await
    };
}

macro_rules! session_cookie {
    ($app:expr) => {{
        let res = test::call_service(
            &$app,
            test::TestRequest::get().uri("/test/sign-in").to_request(),
        )
        .await;
        let cookie: Cookie<'static> = res
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE_NAME)
            .expect("session cookie")
            .into_owned();
        cookie
    }};
}

async fn body_text(res: actix_web::dev::ServiceResponse) -> String {
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[rstest]
#[actix_web::test]
async fn blogs_page_lists_posts(alice: User) {
    let post = post_by(&alice);
    let mut blog = MockBlogService::new();
    blog.expect_list_posts().return_once(move || Ok(vec![post]));
    let app = blogs_app!(accounts_resolving(Some(alice)), blog);
    let cookie = session_cookie!(app);

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/blogs").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["template"], "blogs");
    assert_eq!(body["currentUser"]["username"], "alice");
    assert_eq!(body["context"]["blogs"][0]["id"], POST_ID);
    assert_eq!(body["context"]["blogs"][0]["authorId"], ALICE_ID);
}

#[actix_web::test]
async fn stale_session_is_sent_to_login() {
    let mut blog = MockBlogService::new();
    blog.expect_list_posts().times(0);
    let app = blogs_app!(accounts_resolving(None), blog);
    let cookie = session_cookie!(app);

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/blogs").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some("/login")
    );
}

#[rstest]
#[actix_web::test]
async fn create_redirects_to_blogs(alice: User) {
    let mut blog = MockBlogService::new();
    blog.expect_create_post()
        .withf(|author, draft| {
            author.username() == "alice" && draft.title == "Hello" && draft.content == "World"
        })
        .times(1)
        .return_once(|_, _| Ok(PostId::generate()));
    let app = blogs_app!(accounts_resolving(Some(alice)), blog);
    let cookie = session_cookie!(app);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/post")
            .cookie(cookie)
            .set_form([("title", "Hello"), ("content", "World")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some("/blogs")
    );
}

#[rstest]
#[case("notanid")]
#[case("5f1d7c3a9b2e4f0099999999")]
#[actix_web::test]
async fn unknown_blog_is_a_plain_text_notice(#[case] id: &str) {
    let mut blog = MockBlogService::new();
    blog.expect_get_post()
        .return_once(|_| Err(Error::not_found(POST_NOT_FOUND_MESSAGE)));
    let app = blogs_app!(accounts_resolving(None), blog);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/blog/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, POST_NOT_FOUND_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn blog_page_is_public(alice: User) {
    let post = post_by(&alice);
    let mut blog = MockBlogService::new();
    blog.expect_get_post()
        .with(eq(POST_ID))
        .return_once(move |_| Ok(post));
    let app = blogs_app!(MockAccountService::new(), blog);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/blog/{POST_ID}"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["template"], "blog");
    assert_eq!(body["currentUser"], Value::Null);
    assert_eq!(body["context"]["blog"]["author"]["name"], "Alice");
}

#[rstest]
#[actix_web::test]
async fn foreign_edit_is_a_plain_text_notice(alice: User) {
    let mut blog = MockBlogService::new();
    blog.expect_prepare_update()
        .return_once(|_, _| Err(Error::forbidden(NOT_AUTHOR_MESSAGE)));
    let app = blogs_app!(accounts_resolving(Some(alice)), blog);
    let cookie = session_cookie!(app);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/update/{POST_ID}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, NOT_AUTHOR_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn update_redirects_home(alice: User) {
    let mut blog = MockBlogService::new();
    blog.expect_apply_update()
        .withf(|_, id, draft| id == POST_ID && draft.title == "New")
        .times(1)
        .return_once(|_, _, _| Ok(()));
    let app = blogs_app!(accounts_resolving(Some(alice)), blog);
    let cookie = session_cookie!(app);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/update/{POST_ID}"))
            .cookie(cookie)
            .set_form([("title", "New"), ("content", "Body"), ("blogId", POST_ID)])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some("/")
    );
}

#[rstest]
#[actix_web::test]
async fn profile_renders_user_without_digest(alice: User) {
    let profile = crate::domain::UserProfile {
        user: alice.clone(),
        posts: vec![post_by(&alice)],
    };
    let mut blog = MockBlogService::new();
    blog.expect_user_profile()
        .with(eq(ALICE_ID))
        .return_once(move |_| Ok(profile));
    let app = blogs_app!(accounts_resolving(Some(alice)), blog);
    let cookie = session_cookie!(app);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/user/{ALICE_ID}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["template"], "user");
    assert_eq!(body["context"]["user"]["username"], "alice");
    assert!(body["context"]["user"].get("passwordDigest").is_none());
    assert_eq!(body["context"]["blogs"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn anonymous_delete_is_unauthorised() {
    let mut blog = MockBlogService::new();
    blog.expect_delete_post().times(0);
    let app = blogs_app!(MockAccountService::new(), blog);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/delete-blog?blogId={POST_ID}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(Ok(()), StatusCode::NO_CONTENT)]
#[case(Err(Error::forbidden(NOT_AUTHOR_MESSAGE)), StatusCode::FORBIDDEN)]
#[case(Err(Error::not_found(POST_NOT_FOUND_MESSAGE)), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_maps_outcomes_to_status(
    #[case] outcome: Result<(), Error>,
    #[case] status: StatusCode,
    alice: User,
) {
    let mut blog = MockBlogService::new();
    blog.expect_delete_post()
        .withf(|owner, id| owner.username() == "alice" && id == POST_ID)
        .times(1)
        .return_once(move |_, _| outcome);
    let app = blogs_app!(accounts_resolving(Some(alice)), blog);
    let cookie = session_cookie!(app);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!(
                "/api/delete-blog?blogId={POST_ID}&userId=5f1d7c3a9b2e4f00ffffffff"
            ))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), status);
}
