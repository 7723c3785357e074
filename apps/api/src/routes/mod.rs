use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{any, get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::auth::handlers as auth;
use crate::errors::AppError;
use crate::images::handlers as images;
use crate::jobs::handlers as jobs;
use crate::payments::handlers as payments;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Multipart uploads (resumes and profile images) are capped at 10 MiB.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Resume & image uploads
        .route(
            "/upload",
            post(resume::handle_upload_resume).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/upload/profile-image",
            post(images::handle_upload_profile_image)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Accounts
        .route("/signup", post(auth::handle_signup))
        .route("/login", post(auth::handle_login))
        .route("/reset-password", post(auth::handle_reset_password))
        .route("/user/:id", get(auth::handle_get_user))
        // Jobs & matching
        .route("/jobs", post(jobs::handle_create_job).get(jobs::handle_list_jobs))
        .route("/jobs/:id/suggestions", get(jobs::handle_job_suggestions))
        .route("/jobs/id/:id", get(jobs::handle_get_job))
        .route("/jobs/recruiter/:id", get(jobs::handle_jobs_by_recruiter))
        .route("/users/:id/suggestions", get(jobs::handle_user_suggestions))
        .route("/credit/:id", any(jobs::handle_credit_balance))
        // Payments
        .route("/api/verify-payment", post(payments::handle_verify_payment))
        .fallback(not_found)
        .with_state(state)
}

/// CORS for the single allowed frontend. Preflight requests on any path are
/// answered here with 200 and never reach a handler.
pub fn cors_layer(frontend_origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(frontend_origin)
        .with_context(|| format!("invalid frontend origin '{frontend_origin}'"))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}
