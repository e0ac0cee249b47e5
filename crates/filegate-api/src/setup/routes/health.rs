//! Health check handler and response types.

use crate::state::AppState;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use std::sync::Arc;

const OPERATIONAL: &str = "operational";
const UNAVAILABLE: &str = "unavailable";

#[derive(serde::Serialize)]
pub(super) struct ServiceStatus {
    pub api: &'static str,
    pub file_processing: &'static str,
    pub generative_ai: &'static str,
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub services: ServiceStatus,
}

/// Always 200; a missing API key only marks `generative_ai` unavailable.
pub(super) async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy",
        timestamp: Utc::now(),
        services: ServiceStatus {
            api: OPERATIONAL,
            file_processing: OPERATIONAL,
            generative_ai: if state.gateway_available() {
                OPERATIONAL
            } else {
                UNAVAILABLE
            },
        },
    })
}
