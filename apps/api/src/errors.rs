use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Extraction(ExtractionError::UnsupportedFormat(_)) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_FORMAT")
            }
            AppError::Extraction(_) => (StatusCode::BAD_REQUEST, "EXTRACTION_ERROR"),
            AppError::Llm(LlmError::Auth(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "LLM_AUTH_ERROR")
            }
            AppError::Llm(LlmError::Provider(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "LLM_PROVIDER_ERROR")
            }
            AppError::Llm(LlmError::MalformedResponse(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "LLM_MALFORMED_RESPONSE")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            match &self {
                AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
                other => tracing::error!("{code}: {other}"),
            }
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}
