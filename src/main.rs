use anyhow::Context;
use dotenvy::dotenv;
use ecam::logging::init_tracing;
use ecam::metrics::{init_metrics, metrics_app};
use ecam::router::init_router;
use ecam::state::init_app_state;
use ecam_config::ServerConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let server_config = ServerConfig::from_env();

    if let Some(handle) = init_metrics()? {
        let metrics_addr = format!("{}:{}", server_config.host, server_config.metrics_port);
        let listener = tokio::net::TcpListener::bind(&metrics_addr)
            .await
            .with_context(|| format!("Failed to bind metrics listener on {metrics_addr}"))?;
        info!("Metrics available at http://{}/metrics", metrics_addr);

        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %err, "Metrics server stopped");
            }
        });
    }

    let state = init_app_state().await?;
    let app = init_router(state);

    let addr = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server running on http://{}", addr);
    info!("Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
