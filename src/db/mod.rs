use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::Product;

// ── Bootstrap ─────────────────────────────────────────────────────────────────

/// Open (and create if missing) the SQLite database behind `url`.
pub async fn connect(url: &str, max_connections: u32) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Apply the embedded migrations. Safe to run on every startup.
pub async fn migrate(pool: &SqlitePool) -> AppResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

// ── Reads ─────────────────────────────────────────────────────────────────────

pub async fn fetch_all_products(pool: &SqlitePool) -> AppResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, nombre, precio_cents, stock FROM productos ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Products whose stock is strictly below `threshold`.
pub async fn fetch_low_stock(pool: &SqlitePool, threshold: i64) -> AppResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, nombre, precio_cents, stock FROM productos WHERE stock < ?1 ORDER BY id",
    )
    .bind(threshold)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn fetch_product_by_id(pool: &SqlitePool, id: i64) -> AppResult<Product> {
    sqlx::query_as::<_, Product>(
        "SELECT id, nombre, precio_cents, stock FROM productos WHERE id = ?1",
    )
    .bind(id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .next()
    .ok_or_else(|| not_found(id))
}

pub async fn count_products(pool: &SqlitePool) -> AppResult<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM productos")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

// ── Stock mutations ───────────────────────────────────────────────────────────
//
// Each mutation is a single conditional UPDATE: the guard and the write happen
// in one statement, so SQLite serializes them and no caller can act on a stale
// stock value. When the guard rejects the row we look it up once more only to
// tell "missing" apart from "guard failed".
//
// `fetch_all` runs the statement to completion so the write is committed
// before the row is returned.

pub async fn add_stock(pool: &SqlitePool, id: i64, amount: i64) -> AppResult<Product> {
    ensure_positive(amount)?;

    let updated = sqlx::query_as::<_, Product>(
        r#"
        UPDATE productos
        SET stock = stock + ?1
        WHERE id = ?2
          AND stock <= ?3
        RETURNING id, nombre, precio_cents, stock
        "#,
    )
    .bind(amount)
    .bind(id)
    .bind(i64::MAX - amount)
    .fetch_all(pool)
    .await?;

    match updated.into_iter().next() {
        Some(product) => Ok(product),
        None => {
            fetch_product_by_id(pool, id).await?;
            Err(AppError::InvalidArgument(format!(
                "cantidad {} would overflow the stock of product {}",
                amount, id
            )))
        }
    }
}

pub async fn remove_stock(pool: &SqlitePool, id: i64, amount: i64) -> AppResult<Product> {
    ensure_positive(amount)?;

    let updated = sqlx::query_as::<_, Product>(
        r#"
        UPDATE productos
        SET stock = stock - ?1
        WHERE id = ?2
          AND stock >= ?1
        RETURNING id, nombre, precio_cents, stock
        "#,
    )
    .bind(amount)
    .bind(id)
    .fetch_all(pool)
    .await?;

    match updated.into_iter().next() {
        Some(product) => Ok(product),
        None => {
            fetch_product_by_id(pool, id).await?;
            Err(AppError::InsufficientStock)
        }
    }
}

fn ensure_positive(amount: i64) -> AppResult<()> {
    if amount <= 0 {
        return Err(AppError::InvalidArgument(
            "cantidad must be > 0".to_string(),
        ));
    }
    Ok(())
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Producto {} no encontrado", id))
}
