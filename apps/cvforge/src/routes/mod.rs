pub mod cv;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/variants", get(cv::handle_list_variants))
        .route("/api/v1/cv/generate", post(cv::handle_generate))
        .route("/api/v1/cv/verify", post(cv::handle_verify))
        .with_state(state)
}
