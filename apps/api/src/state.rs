use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both handles are created once at startup and passed in explicitly.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable text generator. Default: `GeminiClient`.
    pub llm: Arc<dyn TextGenerator>,
}
