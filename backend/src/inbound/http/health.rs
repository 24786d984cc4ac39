//! Orchestrator probes.
//!
//! The process moves through three phases: starting until the listener is
//! bound, serving, then draining once the server future resolves. Readiness
//! holds only while serving; liveness fails only while draining.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;

/// Lifecycle phase reported by the probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Starting,
    Serving,
    Draining,
}

impl Phase {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }
}

/// Probe body, e.g. `{"phase":"serving"}`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProbeResponse {
    pub phase: Phase,
}

/// Shared lifecycle phase of the server process.
#[derive(Debug, Default)]
pub struct HealthState {
    phase: AtomicU8,
}

impl HealthState {
    /// A process that has not bound its listener yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The listener is bound and the adapters are wired.
    pub fn mark_ready(&self) {
        // Never resurrect a draining process.
        let _ = self.phase.compare_exchange(
            Phase::Starting as u8,
            Phase::Serving as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// The server is shutting down; liveness fails from now on.
    pub fn mark_unhealthy(&self) {
        self.phase.store(Phase::Draining as u8, Ordering::Release);
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }
}

fn probe_response(ok: bool, phase: Phase) -> HttpResponse {
    let mut builder = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeResponse { phase })
}

/// Readiness probe: 200 while serving.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Serving traffic", body = ProbeResponse),
        (status = 503, description = "Starting or draining", body = ProbeResponse)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let phase = state.phase();
    probe_response(phase == Phase::Serving, phase)
}

/// Liveness probe: 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process is alive", body = ProbeResponse),
        (status = 503, description = "Process is draining", body = ProbeResponse)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    let phase = state.phase();
    probe_response(phase != Phase::Draining, phase)
}
