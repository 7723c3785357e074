use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{Job, NewJob};
use crate::store;

#[derive(Debug, Serialize)]
pub struct CreditBalance {
    pub user_id: Uuid,
    pub credits: i64,
}

pub async fn create_job(pool: &SqlitePool, new_job: NewJob) -> Result<Job, AppError> {
    if store::users::find_by_id(pool, new_job.recruiter_id)
        .await?
        .is_none()
    {
        return Err(AppError::Validation(format!(
            "Recruiter {} does not exist",
            new_job.recruiter_id
        )));
    }

    let job = store::jobs::insert_job(pool, &new_job, Utc::now()).await?;
    info!(job_id = job.id, recruiter_id = %job.recruiter_id, "job posted");
    Ok(job)
}

pub async fn get_job(pool: &SqlitePool, id: i64) -> Result<Job, AppError> {
    store::jobs::find_job(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}

pub async fn credit_balance(pool: &SqlitePool, user_id: Uuid) -> Result<CreditBalance, AppError> {
    let credits = store::users::credits_of(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(CreditBalance { user_id, credits })
}
