use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::recommendations::extraction::ExtractionError;

/// Body returned for every 5xx. The underlying cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(#[from] ExtractionError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => AppError::Config(err.to_string()),
            LlmError::Api { status, body } => AppError::Upstream { status, body },
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {msg}");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            AppError::Upstream { status, body } => {
                tracing::error!("Gemini API error (status {status}): {body}");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            AppError::Parse(e) => {
                tracing::error!("Failed to parse model response: {e}");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
