//! Health Check and Metrics Endpoint
//!
//! Routes merged into the MCP listener for orchestrators and monitoring.
//!
//! # Endpoints
//!
//! - `GET /health` - Returns JSON health status
//! - `GET /healthz` - Liveness check (simple OK)
//! - `GET /readyz` - Readiness check (ready once tools are registered)
//! - `GET /metrics` - Prometheus metrics in text format

use std::sync::Arc;
use std::time::Instant;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::infrastructure::metrics::get_metrics_handle;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: HealthStatus,
    /// MCP server identifier.
    pub server: String,
    /// Binary version.
    pub version: String,
    /// Trading environment (`PAPER` or `LIVE`).
    pub environment: String,
    /// Number of registered tools.
    pub tools: usize,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
    /// Current time.
    pub current_time: DateTime<Utc>,
}

/// Overall health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Serving tools.
    Healthy,
    /// No tools registered.
    Unhealthy,
}

/// Shared state for the health routes.
#[derive(Debug)]
pub struct HealthState {
    server: String,
    version: String,
    environment: String,
    tool_count: usize,
    started_at: Instant,
}

impl HealthState {
    /// Create health state for a fully assembled server.
    #[must_use]
    pub fn new(server: impl Into<String>, environment: impl Into<String>, tool_count: usize) -> Self {
        Self {
            server: server.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: environment.into(),
            tool_count,
            started_at: Instant::now(),
        }
    }

    const fn is_ready(&self) -> bool {
        self.tool_count > 0
    }
}

/// Health and metrics routes.
pub fn routes(state: Arc<HealthState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/healthz", get(liveness_handler))
        .route("/readyz", get(readiness_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let response = build_health_response(&state);
    let status_code = match response.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status_code, Json(response))
}

async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn readiness_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    if state.is_ready() {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}

async fn metrics_handler() -> impl IntoResponse {
    get_metrics_handle().map_or_else(
        || {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [("content-type", "text/plain")],
                "Metrics not initialized".to_string(),
            )
        },
        |handle| {
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                handle.render(),
            )
        },
    )
}

fn build_health_response(state: &HealthState) -> HealthResponse {
    HealthResponse {
        status: if state.is_ready() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        },
        server: state.server.clone(),
        version: state.version.clone(),
        environment: state.environment.clone(),
        tools: state.tool_count,
        uptime_secs: state.started_at.elapsed().as_secs(),
        current_time: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    #[test]
    fn readiness_follows_tool_count() {
        assert!(HealthState::new("s", "PAPER", 44).is_ready());
        assert!(!HealthState::new("s", "PAPER", 0).is_ready());
    }

    #[test]
    fn response_fields() {
        let response = build_health_response(&HealthState::new("alpaca-trading", "LIVE", 3));
        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.server, "alpaca-trading");
        assert_eq!(response.environment, "LIVE");
        assert_eq!(response.tools, 3);
    }
}
