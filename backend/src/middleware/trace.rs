//! Middleware that runs each request inside a fresh [`TraceId`] scope.
//!
//! The identifier is readable from handlers through [`TraceId::current`],
//! is captured by every [`crate::domain::Error`] built during the request,
//! and is echoed to the client in the `trace-id` response header.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::Instrument;

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Attach a trace identifier to every request.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use blog::middleware::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let span = tracing::info_span!(
            "request",
            %trace_id,
            method = %req.method(),
            path = %req.path()
        );
        let fut = self.service.call(req);
        Box::pin(TraceId::scope(
            trace_id,
            async move {
                let mut res = fut.await?;
                match HeaderValue::from_str(&trace_id.to_string()) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => {
                        tracing::error!(%error, "trace id is not a valid header value");
                    }
                }
                tracing::debug!(status = res.status().as_u16(), "request finished");
                Ok(res)
            }
            .instrument(span),
        ))
    }
}
