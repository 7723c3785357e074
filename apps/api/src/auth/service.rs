use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{spawn_dummy_verify, spawn_hash, spawn_verify};
use crate::auth::profile::{load_profile, PublicProfile};
use crate::auth::tokens::JwtKeys;
use crate::errors::AppError;
use crate::models::user::{EducationInput, ExperienceInput, InvalidRole, NewUser, Role};
use crate::store;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub full_name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub current_company: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    pub skills: String,
    pub image: String,
    pub role: String,
    pub education: Vec<EducationInput>,
    pub experience: Vec<ExperienceInput>,
}

/// Body of both `/login` and `/reset-password`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub token: String,
    pub user: PublicProfile,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub message: &'static str,
    pub email: String,
}

fn require_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }
    Ok(())
}

/// Creates the user with its education and experience rows in one
/// transaction, then issues a session token.
pub async fn register(
    pool: &SqlitePool,
    keys: &JwtKeys,
    req: SignupRequest,
) -> Result<AuthResponse, AppError> {
    require_credentials(&req.email, &req.password)?;
    let role: Role = req
        .role
        .parse()
        .map_err(|e: InvalidRole| AppError::Validation(e.to_string()))?;

    let email = req.email.trim().to_string();
    if store::users::find_by_email(pool, &email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let password_hash = spawn_hash(req.password).await?;
    let new_user = NewUser {
        id: Uuid::new_v4(),
        full_name: req.full_name,
        title: req.title,
        location: req.location,
        email,
        password_hash,
        phone: req.phone,
        current_company: req.current_company,
        linkedin: req.linkedin,
        github: req.github,
        portfolio: req.portfolio,
        skills: req.skills,
        image: req.image,
        role,
    };

    let mut tx = pool.begin().await?;
    store::users::insert_user(&mut *tx, &new_user)
        .await
        .map_err(|e| match e {
            // lost a race with a concurrent signup for the same email
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("User already exists".to_string())
            }
            other => AppError::Database(other),
        })?;
    for education in &req.education {
        store::users::insert_education(&mut *tx, new_user.id, education).await?;
    }
    for experience in &req.experience {
        store::users::insert_experience(&mut *tx, new_user.id, experience).await?;
    }
    tx.commit().await?;

    info!(user_id = %new_user.id, role = role.as_str(), "user registered");

    let token = keys.sign(new_user.id)?;
    let user = store::users::find_by_id(pool, new_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(AuthResponse {
        message: "User created successfully",
        token,
        user: load_profile(pool, user).await?,
    })
}

pub async fn login(
    pool: &SqlitePool,
    keys: &JwtKeys,
    req: Credentials,
) -> Result<AuthResponse, AppError> {
    require_credentials(&req.email, &req.password)?;

    let Some(user) = store::users::find_by_email(pool, req.email.trim()).await? else {
        spawn_dummy_verify(req.password).await?;
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };
    if !spawn_verify(req.password, user.password_hash.clone()).await? {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = keys.sign(user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(AuthResponse {
        message: "Login successful",
        token,
        user: load_profile(pool, user).await?,
    })
}

/// Overwrites the stored hash for `email`. No proof of identity is asked
/// for; every reset is logged at WARN so it shows up in audits.
pub async fn reset_password(pool: &SqlitePool, req: Credentials) -> Result<ResetResponse, AppError> {
    require_credentials(&req.email, &req.password)?;
    let email = req.email.trim().to_string();

    let password_hash = spawn_hash(req.password).await?;
    let updated = store::users::update_password_hash(pool, &email, &password_hash).await?;
    if updated == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    warn!(email = %email, "password reset without re-authentication");
    Ok(ResetResponse {
        message: "Password reset successfully",
        email,
    })
}

pub async fn get_user(pool: &SqlitePool, id: Uuid) -> Result<PublicProfile, AppError> {
    let user = store::users::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(load_profile(pool, user).await?)
}
