use anyhow::Context;
use tracing::info;

use inventory_service::config::Config;
use inventory_service::{build_router, db, seed, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,inventory_service=debug".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!(url = %config.database_url, "Opening SQLite database...");
    let pool = db::connect(&config.database_url, config.db_max_connections)
        .await
        .context("failed to open the product database")?;

    // Schema + first-run seed happen once, before we accept requests
    db::migrate(&pool).await.context("failed to run migrations")?;
    let seeded = seed::seed_if_empty(&pool).await.context("failed to seed products")?;
    info!(seeded, "Database ready.");

    let state = AppState {
        db: pool,
        low_stock_threshold: config.low_stock_threshold,
    };

    let app = build_router(state, config.request_timeout);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
