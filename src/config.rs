use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    /// Products with stock strictly below this show up in `/productos/reponer`.
    pub low_stock_threshold: i64,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://tienda.db".to_string()),
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            low_stock_threshold: std::env::var("LOW_STOCK_THRESHOLD")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("LOW_STOCK_THRESHOLD must be a valid integer")?,
            request_timeout: request_timeout_from_env()?,
        })
    }
}

/// Settings for the console client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            base_url: std::env::var("INVENTORY_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            request_timeout: request_timeout_from_env()?,
        })
    }
}

fn request_timeout_from_env() -> anyhow::Result<Duration> {
    let secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
        .unwrap_or_else(|_| "10".to_string())
        .parse()
        .context("REQUEST_TIMEOUT_SECS must be a valid number of seconds")?;
    Ok(Duration::from_secs(secs))
}
