use std::sync::Arc;

use crate::llm_client::CompletionModel;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Immutable after startup; concurrent remix requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `LlmClient` in production.
    pub model: Arc<dyn CompletionModel>,
}
