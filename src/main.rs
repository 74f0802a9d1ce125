//! Loan Predictor server
//!
//! Usage:
//!   cargo run --release
//!
//! Environment:
//!   LOAN_HOST                  - Server host (default: 0.0.0.0)
//!   PORT / LOAN_PORT           - Server port (default: 8080)
//!   LOAN_ARTIFACTS_DIR         - Model artifacts directory (default: ./artifacts)
//!   LOAN_CREDIT_SCORE_FEATURES - unscaled | scaled (default: unscaled)
//!   RUST_LOG                   - Log filter (default: info)

use loan_predictor::api::{create_router, AppState};
use loan_predictor::{AppConfig, ArtifactBundle, InferenceAdapter, PredictionTelemetry};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;

    // Models are loaded once and shared read-only by every request
    let bundle = ArtifactBundle::load_dir(&config.artifacts_dir)?;
    let adapter = Arc::new(InferenceAdapter::from_bundle(
        bundle,
        config.credit_score_features,
    ));

    let telemetry = Arc::new(PredictionTelemetry::new());
    let telemetry_for_shutdown = telemetry.clone();

    let state = Arc::new(AppState::new(adapter, telemetry));
    let app = create_router(state);

    let addr = config.socket_addr()?;
    info!("🚀 Loan Predictor starting on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /                    - Prediction form");
    info!("  POST /solvency            - Solvency panel");
    info!("  POST /loan                - Loan amount panel");
    info!("  POST /v1/predict/solvency - Solvency + credit score (JSON)");
    info!("  POST /v1/predict/loan     - Loan amount (JSON)");
    info!("  GET  /v1/stats            - Prediction statistics");
    info!("  GET  /v1/health           - Health check");

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Shutdown signal received");
    let stats = telemetry_for_shutdown.get_stats();
    info!(
        solvency_predictions = stats.solvency_predictions,
        solvent = stats.solvent,
        not_solvent = stats.not_solvent,
        loan_predictions = stats.loan_predictions,
        failures = stats.failures,
        avg_latency_ms = stats.avg_latency_ms,
        "📊 Session summary"
    );
    info!("👋 Goodbye!");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
