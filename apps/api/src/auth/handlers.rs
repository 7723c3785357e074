use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::profile::PublicProfile;
use crate::auth::service::{
    self, AuthResponse, Credentials, ResetResponse, SignupRequest,
};
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Serialize)]
pub struct UserResponse {
    pub user: PublicProfile,
}

/// POST /signup
pub async fn handle_signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    Ok(Json(service::register(&state.db, &state.jwt, req).await?))
}

/// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<Credentials>,
) -> Result<Json<AuthResponse>, AppError> {
    Ok(Json(service::login(&state.db, &state.jwt, req).await?))
}

/// POST /reset-password
pub async fn handle_reset_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<Credentials>,
) -> Result<Json<ResetResponse>, AppError> {
    Ok(Json(service::reset_password(&state.db, req).await?))
}

/// GET /user/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::Validation("Invalid user ID".to_string()))?;
    let user = service::get_user(&state.db, id).await?;
    Ok(Json(UserResponse { user }))
}
