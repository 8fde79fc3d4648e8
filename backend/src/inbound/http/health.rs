//! Health endpoints: a status report plus liveness and readiness probes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{DatabaseStatus, HealthProbe};

const SERVICE_NAME: &str = "SipTalk API";

/// Readiness and liveness flags plus the database probe.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    probe: Arc<dyn HealthProbe>,
    clock: Arc<dyn Clock>,
}

impl HealthState {
    /// New state: live but not yet ready.
    pub fn new(probe: Arc<dyn HealthProbe>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            probe,
            clock,
        }
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators stop routing traffic during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Overall service health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[schema(example = "SipTalk API")]
    pub service: String,
    pub timestamp: DateTime<Utc>,
    pub database: DatabaseStatus,
}

/// Service status including database reachability.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Service healthy", body = HealthReport),
        (status = 503, description = "Database unreachable", body = HealthReport)
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    let database = state.probe.database_status().await;
    let (status, mut response) = if database.is_failure() {
        (HealthStatus::Unhealthy, HttpResponse::ServiceUnavailable())
    } else {
        (HealthStatus::Healthy, HttpResponse::Ok())
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(HealthReport {
            status,
            service: SERVICE_NAME.to_owned(),
            timestamp: state.clock.utc(),
            database,
        })
}

/// Readiness probe. 200 once startup completed and the database (if any)
/// answers; 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let accepting = state.is_ready() && !state.probe.database_status().await.is_failure();
    HealthState::probe_response(accepting)
}

/// Liveness probe. 200 while alive, 503 once draining.
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
    HealthState::probe_response(state.is_alive())
}
