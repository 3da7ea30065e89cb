pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/models", get(handlers::handle_list_models))
        .route("/hr", post(handlers::handle_hr))
        .route("/resume", post(handlers::handle_resume_upload))
        .route("/resume/text", post(handlers::handle_resume_text))
        .route("/extract", post(handlers::handle_extract))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
