//! Redirect anonymous visitors away from restricted pages.
//!
//! Must be registered inside the session middleware (`.wrap(LoginGuard)`
//! before `.wrap(SessionMiddleware)`), because it reads the session the
//! outer layer has loaded. A request is anonymous when the session carries
//! no user id; whether that id still names an account is left to the
//! handlers.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::LOCATION;
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::domain::requires_login;
use crate::inbound::http::session::USER_ID_KEY;

/// Where anonymous visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Login guard over the restricted path segments.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use blog::middleware::LoginGuard;
///
/// let _app = App::new().wrap(LoginGuard);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LoginGuard;

impl<S, B> Transform<S, ServiceRequest> for LoginGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = LoginGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoginGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service produced by [`LoginGuard`].
pub struct LoginGuardMiddleware<S> {
    service: Rc<S>,
}

fn has_session_user(req: &ServiceRequest) -> bool {
    match req.get_session().get::<String>(USER_ID_KEY) {
        Ok(id) => id.is_some(),
        Err(error) => {
            tracing::warn!(%error, "unreadable session state treated as anonymous");
            false
        }
    }
}

impl<S, B> Service<ServiceRequest> for LoginGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if requires_login(req.path()) && !has_session_user(&req) {
            tracing::debug!(path = %req.path(), "anonymous request redirected to login");
            let redirect = HttpResponse::Found()
                .insert_header((LOCATION, LOGIN_PATH))
                .finish();
            let res = req.into_response(redirect).map_into_right_body();
            return Box::pin(ready(Ok(res)));
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().body("page")
    }

    macro_rules! guarded_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(LoginGuard)
                    .wrap(test_session_middleware())
                    .route(
                        "/sign-in",
                        web::get().to(|session: Session| async move {
                            session
                                .insert(USER_ID_KEY, "5f1d7c3a9b2e4f0012345678")
                                .expect("session insert");
                            HttpResponse::Ok().finish()
                        }),
                    )
                    .default_service(web::to(ok)),
            )
            .await
        };
    }

    #[rstest]
    #[case("/blogs")]
    #[case("/post")]
    #[case("/user/5f1d7c3a9b2e4f0012345678")]
    #[case("/update/5f1d7c3a9b2e4f0012345678")]
    #[actix_web::test]
    async fn anonymous_requests_are_redirected(#[case] path: &str) {
        let app = guarded_app!();
        let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some(LOGIN_PATH)
        );
    }

    #[rstest]
    #[case("/")]
    #[case("/login")]
    #[case("/blog/5f1d7c3a9b2e4f0012345678")]
    #[case("/blog/user")]
    #[case("/api/delete-blog?blogId=blogs")]
    #[actix_web::test]
    async fn public_paths_pass_through(#[case] path: &str) {
        let app = guarded_app!();
        let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn signed_in_requests_pass_through() {
        let app = guarded_app!();
        let sign_in =
            test::call_service(&app, test::TestRequest::get().uri("/sign-in").to_request()).await;
        let cookie = sign_in
            .response()
            .cookies()
            .next()
            .expect("session cookie")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/blogs")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
