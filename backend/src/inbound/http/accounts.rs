//! Account pages: home, login, registration and logout.
//!
//! ```text
//! GET  /            index page
//! GET  /login       login form
//! POST /login       {"username":"alice","password":"pw1"}
//! GET  /register    registration form
//! POST /register    {"name":"Alice","email":"a@x.com","username":"alice","password":"pw1"}
//! GET  /logout
//! ```

use actix_web::{Either, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{LoginCredentials, LoginError, Registration, RegistrationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::current_user::CurrentUser;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{PageView, see_other};

/// Body accepted as a URL-encoded form or as JSON.
pub type FormOrJson<T> = Either<web::Form<T>, web::Json<T>>;

pub(crate) fn form_inner<T>(payload: FormOrJson<T>) -> T {
    match payload {
        Either::Left(form) => form.into_inner(),
        Either::Right(json) => json.into_inner(),
    }
}

/// Login form fields.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form fields.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

fn form_page(template: &'static str, current: &CurrentUser, error: Option<String>) -> HttpResponse {
    PageView::new(template, current.user(), json!({ "error": error })).respond()
}

/// Home page.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Index page", body = PageView)),
    tags = ["accounts"],
    operation_id = "index"
)]
#[get("/")]
pub async fn index(current: CurrentUser) -> HttpResponse {
    PageView::new("index", current.user(), json!({})).respond()
}

/// Login form.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login page", body = PageView)),
    tags = ["accounts"],
    operation_id = "loginPage"
)]
#[get("/login")]
pub async fn login_page(current: CurrentUser) -> HttpResponse {
    form_page("login", &current, None)
}

/// Check credentials and start a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in, redirect to /", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 200, description = "Login page with an error message", body = PageView),
        (status = 503, description = "Store unavailable", body = String)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    current: CurrentUser,
    payload: FormOrJson<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form_inner(payload);
    let credentials = LoginCredentials::new(form.username, form.password);
    match state.accounts.login(&credentials).await {
        Ok(user) => {
            session.persist_user(user.id())?;
            tracing::info!(user_id = %user.id(), "user signed in");
            Ok(see_other("/"))
        }
        Err(LoginError::Service(error)) => Err(error),
        Err(refusal) => Ok(form_page("login", &current, Some(refusal.to_string()))),
    }
}

/// Registration form.
#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Registration page", body = PageView)),
    tags = ["accounts"],
    operation_id = "registerPage"
)]
#[get("/register")]
pub async fn register_page(current: CurrentUser) -> HttpResponse {
    form_page("register", &current, None)
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Registered, redirect to /login"),
        (status = 200, description = "Registration page with an error message", body = PageView),
        (status = 503, description = "Store unavailable", body = String)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    current: CurrentUser,
    payload: FormOrJson<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form_inner(payload);
    let registration = Registration::new(form.name, form.email, form.username, form.password);
    match state.accounts.register(&registration).await {
        Ok(_) => Ok(see_other("/login")),
        Err(RegistrationError::Service(error)) => Err(error),
        Err(conflict) => Ok(form_page("register", &current, Some(conflict.to_string()))),
    }
}

/// End the session.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Signed out, redirect to /")),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other("/")
}
