//! HTTP JSON API server
//!
//! Routes are organized into modules:
//! - routes::transactions: Filtered transaction listing
//! - routes::analytics: Summary, insights and analysis
//! - routes::market: Market snapshot and economic indicators
//! - routes::upload: CSV upload
//! - routes::health: Health check
//!
//! Anything outside `/api` is served from the static directory.

pub mod error;
pub mod routes;

use axum::{
    routing::{any, get, post},
    Router,
};
use smartfin_config::Config;
use smartfin_core::{Dataset, MarketProviderRef};
use smartfin_parser::ParserRef;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use error::{ApiError, ApiResponse, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Shared dataset; uploads take the write lock, everything else reads
    pub dataset: Arc<RwLock<Dataset>>,
    pub market: MarketProviderRef,
    pub parser: ParserRef,
    pub config: Config,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config, dataset: Dataset, market: MarketProviderRef, parser: ParserRef) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(dataset)),
            market,
            parser,
            config,
            started_at: Instant::now(),
        }
    }
}

/// Create the API router, without static file serving
pub fn create_api_router(state: AppState) -> Router {
    use routes::analytics::{api_analyze, api_insights, api_summary};
    use routes::health::api_health;
    use routes::market::{api_economic_indicators, api_market};
    use routes::transactions::api_transactions;
    use routes::upload::api_upload_csv;

    Router::new()
        .route("/api/health", get(api_health))
        .route("/api/summary", get(api_summary))
        .route("/api/transactions", get(api_transactions))
        .route("/api/insights", get(api_insights))
        .route("/api/market", get(api_market))
        .route("/api/economic-indicators", get(api_economic_indicators))
        .route("/api/analyze", post(api_analyze))
        .route("/api/upload-csv", post(api_upload_csv))
        .route("/api/*path", any(api_not_found))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create the application router: API routes plus static files
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    create_api_router(state).fallback_service(ServeDir::new(static_dir))
}

async fn api_not_found(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound {
        resource: uri.path().to_string(),
    }
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until Ctrl-C.
/// Binding errors are returned so startup can fail fast.
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.bind_addr();
    let static_dir = state.config.server.static_dir.clone();
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting SmartFin server on http://{}", addr);
    log::info!("Serving static files from {}", static_dir);
    log::info!("Available routes:");
    log::info!("  - GET  /api/summary");
    log::info!("  - GET  /api/transactions");
    log::info!("  - GET  /api/insights");
    log::info!("  - GET  /api/market");
    log::info!("  - GET  /api/economic-indicators");
    log::info!("  - POST /api/analyze");
    log::info!("  - POST /api/upload-csv");
    log::info!("  - GET  /api/health");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
