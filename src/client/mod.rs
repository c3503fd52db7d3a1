//! HTTP client for the inventory API, plus the interactive console built on it.

pub mod console;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::models::Product;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Explicit handle on the API: base URL plus a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    base_url: String,
    http: reqwest::Client,
}

impl InventoryClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let res = self.http.get(format!("{}/productos", self.base_url)).send().await?;
        decode(res).await
    }

    pub async fn list_restock(&self) -> Result<Vec<Product>, ClientError> {
        let res = self
            .http
            .get(format!("{}/productos/reponer", self.base_url))
            .send()
            .await?;
        decode(res).await
    }

    pub async fn add_stock(&self, id: i64, amount: i64) -> Result<Product, ClientError> {
        self.adjust(id, "agregar", amount).await
    }

    pub async fn remove_stock(&self, id: i64, amount: i64) -> Result<Product, ClientError> {
        self.adjust(id, "quitar", amount).await
    }

    async fn adjust(&self, id: i64, action: &str, amount: i64) -> Result<Product, ClientError> {
        let res = self
            .http
            .post(format!("{}/productos/{}/{}", self.base_url, id, action))
            .query(&[("cantidad", amount)])
            .send()
            .await?;
        decode(res).await
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(ClientError::Api {
            status,
            message: error_message(status, &body),
        });
    }

    let value: Value = serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
    serde_json::from_value(lowercase_keys(value)).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Server message if the body is our JSON error object (or a bare JSON
/// string), the raw text otherwise, the status reason when empty.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            if let Some(Value::String(message)) = map.get("message") {
                return message.clone();
            }
        }
        Ok(Value::String(message)) => return message,
        _ => {}
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Lower-case every object key so field matching ignores case.
fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}
