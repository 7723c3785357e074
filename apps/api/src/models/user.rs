use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// Stored as lowercase text; the `users.role` CHECK constraint mirrors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Recruiter,
    Applicant,
    Admin,
}

#[derive(Debug, Error)]
#[error("Invalid role. Must be recruiter, applicant, or admin")]
pub struct InvalidRole;

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Recruiter => "recruiter",
            Role::Applicant => "applicant",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recruiter" => Ok(Role::Recruiter),
            "applicant" => Ok(Role::Applicant),
            "admin" => Ok(Role::Admin),
            _ => Err(InvalidRole),
        }
    }
}

/// A row of `users`. Not serializable: it carries the password hash.
/// Responses go through `auth::profile::PublicProfile`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub current_company: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    pub skills: String,
    pub image: String,
    pub role: Role,
    #[allow(dead_code)]
    pub credits: i64,
}

/// Column values for a fresh `users` row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub full_name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub current_company: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    pub skills: String,
    pub image: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Education {
    pub id: Uuid,
    #[serde(skip)]
    #[allow(dead_code)]
    pub user_id: Uuid,
    pub institution: String,
    pub location: String,
    pub degree: String,
    pub gpa: String,
    pub years: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Experience {
    pub id: Uuid,
    #[serde(skip)]
    #[allow(dead_code)]
    pub user_id: Uuid,
    pub company: String,
    pub location: String,
    pub title: String,
    pub years: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EducationInput {
    pub institution: String,
    pub location: String,
    pub degree: String,
    pub gpa: String,
    pub years: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExperienceInput {
    pub company: String,
    pub location: String,
    pub title: String,
    pub years: String,
    pub description: String,
}
