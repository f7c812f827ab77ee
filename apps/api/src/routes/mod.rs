pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/analysis/resume",
            post(handlers::handle_analyze_resume),
        )
        .route(
            "/api/v1/analysis/resume/:id",
            get(handlers::handle_get_resume),
        )
        .route("/api/v1/analysis/job", post(handlers::handle_analyze_job))
        .route("/api/v1/analysis/job/:id", get(handlers::handle_get_job))
        .route(
            "/api/v1/analysis/compatibility",
            post(handlers::handle_compatibility),
        )
        .route(
            "/api/v1/analysis/compatibility/:id",
            get(handlers::handle_get_compatibility),
        )
        .route("/api/v1/analysis/score", post(handlers::handle_score))
        .with_state(state)
}
