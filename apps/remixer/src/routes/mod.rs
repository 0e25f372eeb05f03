pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::remix::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/remix", post(handlers::handle_remix))
        .with_state(state)
}
