//! Liveness and readiness endpoints for orchestrators and load balancers.
//!
//! Readiness requires both the startup flag and, when configured, a passing
//! [`ReadinessCheck`]. Liveness only reflects the drain flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::warn;

use crate::domain::ports::ReadinessCheck;

/// Shared health state.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    dependency: Option<Arc<dyn ReadinessCheck>>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            dependency: None,
        }
    }
}

impl HealthState {
    /// Not ready, alive, no dependency check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consult `check` on every readiness request.
    pub fn with_readiness_check(mut self, check: Arc<dyn ReadinessCheck>) -> Self {
        self.dependency = Some(check);
        self
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness checks so the process is drained.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether startup has finished.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Whether the process should keep receiving traffic.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    async fn dependencies_ok(&self) -> bool {
        let Some(dependency) = &self.dependency else {
            return true;
        };
        match dependency.check().await {
            Ok(()) => true,
            Err(error) => {
                warn!(message = %error.message(), "readiness dependency check failed");
                false
            }
        }
    }

    fn status_response(healthy: bool) -> HttpResponse {
        let mut response = if healthy {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness endpoint.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server and database accept traffic"),
        (status = 503, description = "Starting up or database unreachable")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let ok = state.is_ready() && state.dependencies_ok().await;
    HealthState::status_response(ok)
}

/// Liveness endpoint. Returns 503 once [`HealthState::mark_unhealthy`] is called.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::status_response(state.is_alive())
}
