use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::user::{Education, Experience, Role, User};
use crate::store;

/// The public view of a user. Which shape is returned depends only on role.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PublicProfile {
    Recruiter(RecruiterProfile),
    Applicant(ApplicantProfile),
}

#[derive(Debug, Serialize)]
pub struct RecruiterProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub image: String,
    pub current_company: String,
    pub role: Role,
    pub posted_jobs_count: i64,
}

/// Used for both applicants and admins.
#[derive(Debug, Serialize)]
pub struct ApplicantProfile {
    pub id: Uuid,
    pub full_name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub current_company: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    pub skills: String,
    pub image: String,
    pub role: Role,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub applications_count: i64,
}

/// Builds the role-shaped profile. Counts are computed at read time.
pub async fn load_profile(pool: &SqlitePool, user: User) -> Result<PublicProfile, sqlx::Error> {
    let role = user.role;
    match role {
        Role::Recruiter => {
            let posted_jobs_count = store::jobs::count_by_recruiter(pool, user.id).await?;
            Ok(PublicProfile::Recruiter(RecruiterProfile {
                id: user.id,
                full_name: user.full_name,
                email: user.email,
                phone: user.phone,
                image: user.image,
                current_company: user.current_company,
                role,
                posted_jobs_count,
            }))
        }
        Role::Applicant | Role::Admin => {
            let education = store::users::educations_for(pool, user.id).await?;
            let experience = store::users::experiences_for(pool, user.id).await?;
            let applications_count = store::users::count_applications(pool, user.id).await?;
            Ok(PublicProfile::Applicant(ApplicantProfile {
                id: user.id,
                full_name: user.full_name,
                title: user.title,
                location: user.location,
                email: user.email,
                phone: user.phone,
                current_company: user.current_company,
                linkedin: user.linkedin,
                github: user.github,
                portfolio: user.portfolio,
                skills: user.skills,
                image: user.image,
                role,
                education,
                experience,
                applications_count,
            }))
        }
    }
}
