mod config;
mod db;
mod handlers;
mod models;
mod processing;
mod storage;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::Config;
use crate::storage::S3Client;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db_pool: sqlx::PgPool,
    pub s3: Arc<S3Client>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "report_service=info,tower_http=info".into()),
        )
        .init();

    info!("Starting Report Service...");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize database connection pool
    let db_pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url())
        .await?;
    info!("Database connection pool established");

    // Initialize S3 client and ensure the report bucket exists. Bucket
    // creation is best-effort: a failure is logged but does not abort
    // startup, matching the lazy local-dev bootstrap.
    let s3 = Arc::new(S3Client::new(&config.storage).await);
    if let Err(e) = s3.ensure_bucket().await {
        tracing::warn!("Could not ensure report bucket exists: {}", e);
    } else {
        info!("Report bucket ready");
    }

    // Build application state
    let state = AppState {
        config: config.clone(),
        db_pool,
        s3,
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/", get(handlers::health::index))
        .route("/health", get(handlers::health::health_check))
        .route("/api/reports", get(handlers::reports::list_reports))
        .route("/api/upload", post(handlers::upload::upload_report))
        .route("/api/process", post(handlers::process::process_report))
        .route("/api/stats", get(handlers::stats::get_statistics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Report Service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
