use anyhow::Context;
use aristokrat::aristokrat_config::ServerConfig;
use aristokrat::aristokrat_db::run_migrations;
use aristokrat::logging::init_tracing;
use aristokrat::metrics::{init_metrics, metrics_app};
use aristokrat::router::init_router;
use aristokrat::state::init_app_state;
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guards = init_tracing()?;
    let server_config = ServerConfig::from_env();

    if let Some(handle) = init_metrics()? {
        let metrics_address = server_config.metrics_address();
        let listener = tokio::net::TcpListener::bind(&metrics_address)
            .await
            .with_context(|| format!("Failed to bind metrics listener on {metrics_address}"))?;
        tracing::info!("Metrics available at http://{metrics_address}/metrics");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                tracing::error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let state = init_app_state().await?;
    run_migrations(&state.db).await?;
    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!("Server running on http://{address}");
    tracing::info!("Swagger UI available at http://{address}/swagger-ui");
    tracing::info!("Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app).await?;
    Ok(())
}
