mod api;
mod app;
mod auth;
mod config;
mod domain;
mod error;
mod logging;
mod middleware;
mod routes;
mod services;

use anyhow::Result;
use std::sync::Arc;

use services::{EstimationClient, GeminiClient, GenerativeModel, RetryPolicy};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        model = %settings.gemini_model,
        "Starting civilplan backend"
    );

    // Create generative model client
    let gemini = GeminiClient::new(
        &settings.gemini_api_url,
        &settings.gemini_api_key,
        &settings.gemini_model,
        settings.gemini_timeout_seconds,
    )?;

    // Optionally check model availability (non-blocking)
    tokio::spawn({
        let gemini = gemini.clone();
        async move {
            match gemini.health_check().await {
                Ok(()) => tracing::info!("Gemini model is reachable"),
                Err(e) => tracing::warn!(error = %e, "Gemini health check failed - estimates may fail"),
            }
        }
    });

    let estimator = EstimationClient::new(
        Arc::new(gemini),
        RetryPolicy::with_max_retries(settings.estimate_max_retries),
    );

    // Create application state
    let state = app::AppState::new(settings.clone(), estimator);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
