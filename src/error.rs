use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Message returned when a removal would drive stock below zero.
pub const INSUFFICIENT_STOCK_MESSAGE: &str = "No se puede quitar más stock del disponible.";

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{}", INSUFFICIENT_STOCK_MESSAGE)]
    InsufficientStock,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientStock | AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::StorageUnavailable(_) | AppError::Migration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::InsufficientStock => "insufficient_stock",
            AppError::InvalidArgument(_) => "invalid_argument",
            AppError::StorageUnavailable(_) | AppError::Migration(_) => "storage_unavailable",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // Backend details stay in the logs.
            AppError::StorageUnavailable(_) | AppError::Migration(_) => {
                error!(error = %self, "Storage failure while handling request");
                "storage unavailable".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(json!({
                "error": self.code(),
                "message": message,
            })),
        )
            .into_response()
    }
}
