use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use fiq_core::responses::{HealthResponse, ServiceStatus};

use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        timestamp: Utc::now(),
        services: ServiceStatus {
            storage: state.archive.is_configured(),
            backend: state.backend.is_configured(),
        },
    })
}
