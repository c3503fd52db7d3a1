use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod seed;

/// Shared application state — cheap to clone (the pool is reference counted).
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub low_stock_threshold: i64,
}

pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Products ────────────────────────────────────────────────────────
        .route("/productos", get(handlers::products::list_products))
        .route("/productos/reponer", get(handlers::products::list_restock))
        .route("/productos/:id/agregar", post(handlers::products::add_stock))
        .route("/productos/:id/quitar", post(handlers::products::remove_stock))

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
