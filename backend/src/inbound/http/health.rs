//! Liveness and readiness probes.
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Probe state shared with the server lifecycle.
///
/// Starts live but not ready; the server marks it ready once the listener is
/// bound and unhealthy when shutdown begins.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness probes from now on.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn probe(ok: bool) -> HttpResponse {
    let mut builder = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Accepting traffic"),
        (status = 503, description = "Still starting")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_ready())
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process alive"),
        (status = 503, description = "Shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_alive())
}
