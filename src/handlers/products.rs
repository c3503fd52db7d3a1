use std::time::Instant;

use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    Json,
};
use tracing::{info, warn};

use crate::{
    db,
    error::{AppError, AppResult},
    models::{Product, StockAdjustment},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let start = Instant::now();
    let products = db::fetch_all_products(&state.db).await?;

    info!(
        count = products.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed products"
    );

    Ok(Json(products))
}

pub async fn list_restock(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let start = Instant::now();
    let products = db::fetch_low_stock(&state.db, state.low_stock_threshold).await?;

    info!(
        count = products.len(),
        threshold = state.low_stock_threshold,
        elapsed_ms = start.elapsed().as_millis(),
        "Listed products to restock"
    );

    Ok(Json(products))
}

// ── Stock adjustments ─────────────────────────────────────────────────────────

pub async fn add_stock(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    adjustment: Result<Query<StockAdjustment>, QueryRejection>,
) -> AppResult<Json<Product>> {
    let (id, amount) = parse_adjustment(id, adjustment)?;

    let product = db::add_stock(&state.db, id, amount)
        .await
        .inspect_err(|e| warn!(id, amount, error = %e, "Add stock rejected"))?;

    info!(id, amount, stock = product.stock, "Added stock");
    Ok(Json(product))
}

pub async fn remove_stock(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    adjustment: Result<Query<StockAdjustment>, QueryRejection>,
) -> AppResult<Json<Product>> {
    let (id, amount) = parse_adjustment(id, adjustment)?;

    let product = db::remove_stock(&state.db, id, amount)
        .await
        .inspect_err(|e| warn!(id, amount, error = %e, "Remove stock rejected"))?;

    info!(id, amount, stock = product.stock, "Removed stock");
    Ok(Json(product))
}

fn parse_adjustment(
    id: Result<Path<i64>, PathRejection>,
    adjustment: Result<Query<StockAdjustment>, QueryRejection>,
) -> AppResult<(i64, i64)> {
    let Path(id) = id.map_err(|e| AppError::InvalidArgument(format!("invalid id: {}", e.body_text())))?;
    let Query(adjustment) = adjustment
        .map_err(|e| AppError::InvalidArgument(format!("invalid cantidad: {}", e.body_text())))?;
    Ok((id, adjustment.cantidad))
}
