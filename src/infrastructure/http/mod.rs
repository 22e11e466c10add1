pub mod request_id;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use crate::controllers::{
    health, history::HistoryController, ideas::IdeasController, saved::SavedController,
    usage::UsageController,
};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::KeyValueRepository;

/// Assemble every route with its controller state
pub fn build_router(
    store: Arc<dyn KeyValueRepository>,
    ideas_controller: Arc<IdeasController>,
    saved_controller: Arc<SavedController>,
    history_controller: Arc<HistoryController>,
    usage_controller: Arc<UsageController>,
) -> Router {
    let idea_routes = Router::new()
        .route("/api/ideas", get(IdeasController::list_current))
        .route("/api/ideas/generate", post(IdeasController::generate))
        .route("/api/ideas/export", get(IdeasController::export))
        .route("/api/ideas/:id/copy", get(IdeasController::copy))
        .with_state(ideas_controller);

    let saved_routes = Router::new()
        .route(
            "/api/saved",
            get(SavedController::list_saved).post(SavedController::save_idea),
        )
        .route(
            "/api/saved/:id",
            axum::routing::delete(SavedController::remove_idea),
        )
        .with_state(saved_controller);

    let history_routes = Router::new()
        .route("/api/history", get(HistoryController::list_history))
        .route("/api/history/:id/load", post(HistoryController::load_entry))
        .with_state(history_controller);

    let usage_routes = Router::new()
        .route("/api/usage", get(UsageController::get_usage))
        .route("/api/tier", put(UsageController::set_tier))
        .with_state(usage_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(store)
        .merge(idea_routes)
        .merge(saved_routes)
        .merge(history_routes)
        .merge(usage_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until shutdown
pub async fn start_http_server(
    config: &Config,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
