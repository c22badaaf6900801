//! Server construction and middleware wiring.
//!
//! Middleware order, outermost first: [`Trace`], the cookie session, then
//! [`LoginGuard`], which reads the session the layer above has loaded.

mod config;
mod state_builders;

pub use config::ServerSettings;
pub use state_builders::{diesel_http_state, http_state_with, in_memory_http_state};

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::body::MessageBody;
use actix_web::cookie::time::Duration;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::accounts::{index, login, login_page, logout, register, register_page};
use crate::inbound::http::blogs::{
    compose_page, create_blog, delete_blog, edit_page, list_blogs, show_blog, update_blog,
    user_profile,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::session::SESSION_COOKIE_NAME;
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::middleware::{LoginGuard, Trace};

const SESSION_TTL_HOURS: i64 = 2;

/// Everything one application instance needs.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub session: SessionSettings,
}

/// Cookie session carrying only the signed-in user's id.
pub fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".into())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(settings.same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::hours(SESSION_TTL_HOURS)),
        )
        .build()
}

/// Assemble routes, state and middleware.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(index)
        .service(login_page)
        .service(login)
        .service(register_page)
        .service(register)
        .service(logout)
        .service(list_blogs)
        .service(compose_page)
        .service(create_blog)
        .service(user_profile)
        .service(show_blog)
        .service(edit_page)
        .service(update_blog)
        .service(delete_blog)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.wrap(LoginGuard)
        .wrap(session_middleware(&session))
        .wrap(Trace)
}

/// Bind the listener and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    session: SessionSettings,
    bind_addr: (String, u16),
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
