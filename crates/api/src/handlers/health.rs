//! Service health and version endpoints.

use axum::extract::State;
use chrono::Utc;
use mindcard_core::types::Timestamp;
use serde::Serialize;

use crate::response::{ApiResponse, DEFAULT_SUCCESS_MESSAGE};
use crate::state::AppState;

const DESCRIPTION: &str = "Mind card management service";

/// Basic health payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `UP` when the database answers, `DEGRADED` otherwise.
    pub status: &'static str,
    pub application: String,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
    pub timestamp: Timestamp,
}

/// Health payload with process details.
#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    #[serde(flatten)]
    pub health: HealthResponse,
    pub uptime_secs: u64,
    pub system: SystemInfo,
}

#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub available_parallelism: usize,
    pub os: &'static str,
    pub arch: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub application: String,
    pub version: &'static str,
    pub description: &'static str,
}

async fn probe(state: &AppState) -> HealthResponse {
    let db_healthy = mindcard_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Database health check failed");
    }

    HealthResponse {
        status: if db_healthy { "UP" } else { "DEGRADED" },
        application: state.config.app_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        timestamp: Utc::now(),
    }
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    ApiResponse::ok(probe(&state).await, DEFAULT_SUCCESS_MESSAGE)
}

/// GET /health/detailed
pub async fn detailed_health(State(state): State<AppState>) -> ApiResponse<DetailedHealthResponse> {
    let available_parallelism = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    let detailed = DetailedHealthResponse {
        health: probe(&state).await,
        uptime_secs: state.started_at.elapsed().as_secs(),
        system: SystemInfo {
            available_parallelism,
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        },
    };
    ApiResponse::ok(detailed, DEFAULT_SUCCESS_MESSAGE)
}

/// GET /health/version
pub async fn version(State(state): State<AppState>) -> ApiResponse<VersionResponse> {
    ApiResponse::ok(
        VersionResponse {
            application: state.config.app_name.clone(),
            version: env!("CARGO_PKG_VERSION"),
            description: DESCRIPTION,
        },
        DEFAULT_SUCCESS_MESSAGE,
    )
}
