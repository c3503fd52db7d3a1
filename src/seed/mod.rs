use sqlx::SqlitePool;
use tracing::info;

use crate::db;
use crate::error::AppResult;

/// Number of products written on first run.
pub const SEED_PRODUCTS: i64 = 10;

/// Stock every seeded product starts with.
pub const SEED_STOCK: i64 = 10;

/// Seed product `i` (1-based): "Producto i", price 10 + i.
fn seed_row(i: i64) -> (String, i64) {
    (format!("Producto {}", i), (10 + i) * 100)
}

/// Insert the starter catalogue if the table is empty. Returns how many rows
/// were written (0 when the store was already populated).
pub async fn seed_if_empty(pool: &SqlitePool) -> AppResult<usize> {
    let mut tx = pool.begin().await?;

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM productos")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        info!(existing, "Product table already populated, skipping seed");
        return Ok(0);
    }

    for i in 1..=SEED_PRODUCTS {
        let (name, price_cents) = seed_row(i);
        sqlx::query("INSERT INTO productos (nombre, precio_cents, stock) VALUES (?1, ?2, ?3)")
            .bind(&name)
            .bind(price_cents)
            .bind(SEED_STOCK)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    let total = db::count_products(pool).await?;
    info!(inserted = SEED_PRODUCTS, total, "Seeded product table");
    Ok(SEED_PRODUCTS as usize)
}
