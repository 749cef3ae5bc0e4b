//! Shepherd church management platform
//!
//! Main application entry point

use anyhow::Context;
use tracing::info;

use shepherd::api::{build_router, AppState};
use shepherd::config::Settings;
use shepherd::database::{connection, DatabaseService};
use shepherd::middleware::{RateLimitConfig, RateLimiter};
use shepherd::services::ServiceFactory;
use shepherd::utils::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate().context("Invalid configuration")?;

    // Initialize logging
    logging::init_logging(&settings.logging).context("Failed to initialize logging")?;

    info!("Starting Shepherd church management platform...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = connection::DatabaseConfig::from_settings(&settings.database);
    let db_pool = connection::create_pool(&db_config)
        .await
        .context("Failed to connect to the database")?;

    // Run database migrations
    connection::run_migrations(&db_pool)
        .await
        .context("Failed to run migrations")?;

    // Initialize services
    info!("Initializing services...");
    let database_service = DatabaseService::new(db_pool.clone());
    let services = ServiceFactory::new(database_service, settings.clone())
        .context("Failed to initialize services")?;

    let health = services.health_check().await;
    if !health.redis_healthy {
        info!("Redis unavailable at startup; dashboard caching degrades to direct queries");
    }

    let state = AppState {
        services,
        settings: settings.clone(),
        db_pool,
        rate_limiter: RateLimiter::new(RateLimitConfig::default()),
    };

    // Serve the API
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(addr = %addr, "Shepherd is ready");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shepherd has been shut down.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
