use anyhow::Result;
use healthstat_http::{AppState, create_router};
use healthstat_service::{QueryService, StatsService};
use healthstat_storage::StorageBackend;
use std::sync::Arc;

pub(crate) async fn run(storage: Arc<StorageBackend>, port: u16, host: String) -> Result<()> {
    let state = Arc::new(AppState {
        query_service: Arc::new(QueryService::new(Arc::clone(&storage))),
        stats_service: Arc::new(StatsService::new(storage)),
    });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down HTTP server");
}
