use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub ai_service: String,
}

/// Health check endpoint - public
///
/// The AI service is not critical for the static pages, so an unreachable
/// model only degrades the status.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let ai_result = state.estimator.model().health_check().await;

    if let Err(e) = &ai_result {
        tracing::warn!(error = %e, "AI service health check failed");
    }

    let (status, ai_status) = if ai_result.is_ok() {
        ("healthy", "ok")
    } else {
        ("degraded", "error")
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services: ServiceHealth {
            ai_service: ai_status.to_string(),
        },
    })
}
