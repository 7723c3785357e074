use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::job::{Job, NewJob};

/// `created_at` is stored as fixed-width RFC 3339 text so that ordering by
/// the column is chronological.
pub async fn insert_job(
    pool: &SqlitePool,
    job: &NewJob,
    created_at: DateTime<Utc>,
) -> Result<Job, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO jobs (
            title, company, location, salary_min, salary_max, job_type,
            description, tags, created_at, recruiter_id
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&job.title)
    .bind(&job.company)
    .bind(&job.location)
    .bind(job.salary_min)
    .bind(job.salary_max)
    .bind(&job.job_type)
    .bind(&job.description)
    .bind(&job.tags)
    .bind(created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
    .bind(job.recruiter_id)
    .fetch_one(pool)
    .await
}

/// Newest first. Ties on `created_at` fall back to insertion order.
pub async fn list_jobs(pool: &SqlitePool) -> Result<Vec<Job>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM jobs ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_by_recruiter(
    pool: &SqlitePool,
    recruiter_id: Uuid,
) -> Result<Vec<Job>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM jobs WHERE recruiter_id = ? ORDER BY created_at DESC, id DESC")
        .bind(recruiter_id)
        .fetch_all(pool)
        .await
}

pub async fn find_job(pool: &SqlitePool, id: i64) -> Result<Option<Job>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM jobs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn count_by_recruiter(pool: &SqlitePool, recruiter_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE recruiter_id = ?")
        .bind(recruiter_id)
        .fetch_one(pool)
        .await
}
