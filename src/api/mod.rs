pub mod models;
pub mod review;

// Re-exports
pub use models::*;

use axum::{routing::get, Json, Router};
use tower_http::trace::TraceLayer;

// Health handler (simple, keep here)
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full router with state and request tracing attached
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(review::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
