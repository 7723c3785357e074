use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::tokens::JwtKeys;
use crate::images::ImageStore;
use crate::llm_client::TextGenerator;
use crate::payments::PaymentVerifier;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Generative-text backend. Gemini in production, a stub in tests.
    pub llm: Arc<dyn TextGenerator>,
    pub images: Arc<dyn ImageStore>,
    pub payments: Arc<dyn PaymentVerifier>,
    pub jwt: JwtKeys,
}
