use std::sync::Arc;

use sqlx::PgPool;

use crate::extraction::Extractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable extraction strategy. LLM-first with heuristic fallback when a
    /// provider is configured, heuristic only otherwise.
    pub extractor: Arc<dyn Extractor>,
}
