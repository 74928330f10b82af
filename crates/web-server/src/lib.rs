use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, put},
};
use configuration::Config;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};
use tracker::TrackerService;

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub service: TrackerService,
}

/// Builds the router with every route and middleware layer attached.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/items", get(handlers::list_items).post(handlers::create_item))
        .route("/items/csv", get(handlers::export_items_csv))
        .route(
            "/items/:id",
            put(handlers::update_item).delete(handlers::delete_item),
        )
        .route("/analytics", get(handlers::get_analytics))
        .route("/analytics/summary", get(handlers::get_summary))
        .route("/analytics/csv", get(handlers::export_analytics_csv))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
}

/// Opens the configured store and serves the API until Ctrl-C or SIGTERM.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store = database::open_store(&config.database).await?;
    let app_state = Arc::new(AppState {
        service: TrackerService::new(store),
    });
    let app = build_router(app_state);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, in_memory = config.database.in_memory, "Web server started.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = wait_for_signal("Ctrl-C", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM.");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, draining connections.");
}

/// Resolves when `signal` fires. A listener that fails to install never
/// resolves, so it cannot trigger a shutdown by itself.
async fn wait_for_signal<F>(name: &str, signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(signal = name, error = %e, "Failed to listen for signal.");
        std::future::pending::<()>().await;
    }
}
