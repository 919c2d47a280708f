pub mod dashboard;
pub mod estimates;
pub mod health;
pub mod pricing;
pub mod session;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        .route("/pricing", get(pricing::list_pricing))
        // Demo login and role-gated dashboard
        .route("/session", post(session::login))
        .route("/dashboard", get(dashboard::get_dashboard))
        // Estimation
        .route("/estimates", post(estimates::create_estimate))
}
