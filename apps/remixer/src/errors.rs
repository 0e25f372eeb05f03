use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Message returned to callers for every endpoint failure.
/// Bad input and upstream outages are deliberately indistinguishable.
pub const GENERIC_FAILURE: &str = "Failed to process request";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::BadRequest(msg) => tracing::error!("Remix request rejected: {msg}"),
            AppError::Llm(e) => tracing::error!("LLM error: {e}"),
        }

        let body = Json(json!({ "error": GENERIC_FAILURE }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
