//! API Server Entry Point
//!
//! Application entry point and server initialization.

use api::config::build_auth_services;
use api::{ApiConfig, build_router, telemetry};
use auth::{PgUserRepository, auth_router};
use sqlx::postgres::PgPoolOptions;
use task::{PgTaskRepository, task_router};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    telemetry::init();

    let config = ApiConfig::from_env()?;

    let services = build_auth_services(config.auth).await?;
    tracing::info!(
        token_ttl_secs = services.config.token_ttl_secs(),
        hash_concurrency = services.hasher.max_concurrent(),
        "Auth services ready"
    );

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let gate = services.gate();
    let app = build_router(
        auth_router(PgUserRepository::new(pool.clone()), services),
        task_router(PgTaskRepository::new(pool), gate),
        &config.frontend_origins,
    );

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
