use review_catalog::api::{self, AppState};
use review_catalog::config::AppConfig;
use review_catalog::{CatalogService, ServiceDbClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first, it decides the log level
    let config = AppConfig::load()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {e}"))?;

    info!("🚀 Starting Review Catalog Service");
    info!("📋 Configuration loaded");
    info!("   - servicedb: {}", config.servicedb.base_url);
    info!("   - Timeout: {}s", config.servicedb.timeout_secs);
    info!("   - Server: {}", config.bind_addr());

    // Upstream client is built once and shared by every request
    let store = ServiceDbClient::new(&config.servicedb.base_url, config.servicedb.timeout())?;
    let state = AppState {
        catalog: CatalogService::new(Arc::new(store)),
    };

    let app = api::app(state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET    /health                    - Health check");
    info!("   GET    /api/reviews               - List reviews");
    info!("   GET    /api/reviews/{{id}}          - Get review");
    info!("   POST   /api/reviews               - Create review");
    info!("   PUT    /api/reviews/{{id}}          - Update review");
    info!("   DELETE /api/reviews/{{id}}          - Delete review");
    info!("   POST   /api/reviews/{{id}}/like     - Like review");
    info!("   POST   /api/reviews/{{id}}/dislike  - Dislike review");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
