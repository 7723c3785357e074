use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_min: i64,
    pub salary_max: i64,
    #[serde(rename = "type")]
    pub job_type: String,
    pub description: String,
    pub tags: String,
    pub created_at: DateTime<Utc>,
    pub recruiter_id: Uuid,
}

/// Body of `POST /jobs`. Everything but the recruiter is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary_min: i64,
    #[serde(default)]
    pub salary_max: i64,
    #[serde(default, rename = "type")]
    pub job_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
    pub recruiter_id: Uuid,
}
