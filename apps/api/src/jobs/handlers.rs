use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::jobs::matching::{self, CandidateMatches, JobRecommendation};
use crate::jobs::service::{self, CreditBalance};
use crate::models::job::{Job, NewJob};
use crate::state::AppState;
use crate::store;

fn parse_job_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::Validation("Invalid job ID".to_string()))
}

fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation("Invalid user ID".to_string()))
}

/// POST /jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewJob>,
) -> Result<Json<Job>, AppError> {
    Ok(Json(service::create_job(&state.db, req).await?))
}

/// GET /jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<Job>>, AppError> {
    Ok(Json(store::jobs::list_jobs(&state.db).await?))
}

/// GET /jobs/id/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Job>, AppError> {
    let id = parse_job_id(&id)?;
    Ok(Json(service::get_job(&state.db, id).await?))
}

/// GET /jobs/recruiter/:id
pub async fn handle_jobs_by_recruiter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Job>>, AppError> {
    let recruiter_id = parse_user_id(&id)?;
    Ok(Json(
        store::jobs::list_by_recruiter(&state.db, recruiter_id).await?,
    ))
}

/// GET /jobs/:id/suggestions
pub async fn handle_job_suggestions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CandidateMatches>, AppError> {
    let job_id = parse_job_id(&id)?;
    let matches = matching::suggest_candidates(&state.db, state.llm.as_ref(), job_id).await?;
    Ok(Json(matches))
}

/// GET /users/:id/suggestions
pub async fn handle_user_suggestions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<JobRecommendation>>, AppError> {
    let user_id = parse_user_id(&id)?;
    let recommendations =
        matching::recommend_jobs(&state.db, state.llm.as_ref(), user_id).await?;
    Ok(Json(recommendations))
}

/// ANY /credit/:id
pub async fn handle_credit_balance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CreditBalance>, AppError> {
    let user_id = parse_user_id(&id)?;
    Ok(Json(service::credit_balance(&state.db, user_id).await?))
}
