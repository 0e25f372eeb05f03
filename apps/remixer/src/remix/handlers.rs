//! Axum route handlers for the Remix API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::remix::prompts::{build_instruction, DEFAULT_INSTRUCTION};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct RemixRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemixResponse {
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/remix
///
/// Sends `prompt` (or the default instruction) plus the quoted `content` to the
/// completion model and returns the first text block of the reply.
/// Malformed bodies fail the same way upstream errors do: 500 with `error`.
pub async fn handle_remix(
    State(state): State<AppState>,
    payload: Result<Json<RemixRequest>, JsonRejection>,
) -> Result<Json<RemixResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let template = request.prompt.as_deref().unwrap_or(DEFAULT_INSTRUCTION);
    let instruction = build_instruction(template, &request.content);

    info!(
        content_len = request.content.len(),
        custom_prompt = request.prompt.is_some(),
        "Remixing content"
    );

    let message = state.model.complete(&instruction).await?;

    Ok(Json(RemixResponse { message }))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::llm_client::{CompletionModel, LlmError};
    use crate::routes::build_router;

    use super::*;

    /// Records every instruction it receives and answers with a fixed reply.
    struct MockModel {
        reply: Result<String, u16>,
        seen: Mutex<Vec<String>>,
    }

    impl MockModel {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionModel for MockModel {
        async fn complete(&self, instruction: &str) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(instruction.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream unavailable".to_string(),
                }),
            }
        }
    }

    async fn post_remix(model: Arc<MockModel>, body: &str) -> (StatusCode, Value) {
        let app = build_router(AppState { model });
        let response = app
            .oneshot(
                Request::post("/api/remix")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_absent_prompt_uses_default_instruction() {
        let model = MockModel::replying("Hello world! 🌍");
        let (status, body) = post_remix(
            model.clone(),
            r#"{"content":"Hello world, this is a long post about my day."}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Hello world! 🌍" }));
        assert_eq!(
            *model.seen.lock().unwrap(),
            vec![format!(
                "{DEFAULT_INSTRUCTION} \"Hello world, this is a long post about my day.\""
            )]
        );
    }

    #[tokio::test]
    async fn test_supplied_prompt_is_sent_verbatim() {
        let model = MockModel::replying("Good day.");
        let (status, body) = post_remix(
            model.clone(),
            r#"{"content":"hey whats up","prompt":"Rewrite formally:"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Good day.");
        assert_eq!(
            *model.seen.lock().unwrap(),
            vec!["Rewrite formally: \"hey whats up\"".to_string()]
        );
    }

    #[tokio::test]
    async fn test_null_prompt_falls_back_to_default() {
        let model = MockModel::replying("ok");
        let (status, _) = post_remix(model.clone(), r#"{"content":"x","prompt":null}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert!(model.seen.lock().unwrap()[0].starts_with(DEFAULT_INSTRUCTION));
    }

    #[tokio::test]
    async fn test_upstream_failure_returns_500_without_message() {
        let model = MockModel::failing(529);
        let (status, body) = post_remix(model, r#"{"content":"anything"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to process request");
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_returns_generic_500() {
        for bad in [r#"{"prompt":"no content"}"#, "not json", r#"{"content":42}"#] {
            let model = MockModel::replying("unused");
            let (status, body) = post_remix(model.clone(), bad).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({ "error": "Failed to process request" }));
            assert!(model.seen.lock().unwrap().is_empty());
        }
    }
}
