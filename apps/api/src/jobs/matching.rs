use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::credits::charge_credit;
use crate::jobs::prompts::{
    build_candidate_match_prompt, build_job_recommendation_prompt, ProfileWithExperience,
};
use crate::llm_client::{call_json, TextGenerator};
use crate::models::user::Role;
use crate::store;

#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub name: String,
    pub email: String,
    pub matching_score: u32,
    pub reasoning: String,
    pub recommended: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateMatches {
    pub matches: Vec<CandidateMatch>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobRecommendation {
    pub title: String,
    pub company: String,
    pub matching_score: u32,
    pub reasoning: String,
    pub recommended: bool,
}

#[derive(Debug, Deserialize)]
struct JobRecommendations {
    recommendations: Vec<JobRecommendation>,
}

/// Ranks every applicant against one job. Charges the job's recruiter one
/// credit before the model is called; the credit is not refunded if the
/// call fails.
pub async fn suggest_candidates(
    pool: &SqlitePool,
    llm: &dyn TextGenerator,
    job_id: i64,
) -> Result<CandidateMatches, AppError> {
    let job = store::jobs::find_job(pool, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    let recruiter = store::users::find_by_id(pool, job.recruiter_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recruiter not found".to_string()))?;

    charge_credit(pool, recruiter.id).await?;

    let applicants = store::users::list_by_role(pool, Role::Applicant).await?;
    let mut experiences = Vec::with_capacity(applicants.len());
    for applicant in &applicants {
        experiences.push(store::users::experiences_for(pool, applicant.id).await?);
    }
    let candidates: Vec<ProfileWithExperience<'_>> = applicants
        .iter()
        .zip(&experiences)
        .map(|(user, experience)| ProfileWithExperience {
            user,
            experience: experience.as_slice(),
        })
        .collect();

    let prompt = build_candidate_match_prompt(&job, &candidates);
    let result: CandidateMatches = call_json(llm, &prompt).await?;

    info!(
        job_id,
        candidates = candidates.len(),
        matches = result.matches.len(),
        "candidate suggestions generated"
    );
    Ok(result)
}

/// Ranks every job for one user. Charges that user one credit first.
pub async fn recommend_jobs(
    pool: &SqlitePool,
    llm: &dyn TextGenerator,
    user_id: Uuid,
) -> Result<Vec<JobRecommendation>, AppError> {
    let user = store::users::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    charge_credit(pool, user.id).await?;

    let experience = store::users::experiences_for(pool, user.id).await?;
    let jobs = store::jobs::list_jobs(pool).await?;
    let profile = ProfileWithExperience {
        user: &user,
        experience: &experience,
    };

    let prompt = build_job_recommendation_prompt(&profile, &jobs);
    let result: JobRecommendations = call_json(llm, &prompt).await?;

    info!(
        user_id = %user_id,
        jobs = jobs.len(),
        recommendations = result.recommendations.len(),
        "job recommendations generated"
    );
    Ok(result.recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{new_job, seed_user, set_credits, test_pool, StubGenerator};

    const MATCHES_REPLY: &str = r#"```json
{"matches":[{"name":"Ann","email":"ann@example.com","matching_score":91,"reasoning":"rust","recommended":true}]}
```"#;

    const RECOMMENDATIONS_REPLY: &str = r#"{"recommendations":[{"title":"Backend Engineer","company":"Acme","matching_score":80,"reasoning":"fit","recommended":true}]}"#;

    #[tokio::test]
    async fn suggest_candidates_charges_the_recruiter_and_returns_matches() {
        let pool = test_pool().await;
        let recruiter = seed_user(&pool, "boss@example.com", Role::Recruiter).await;
        seed_user(&pool, "ann@example.com", Role::Applicant).await;
        let job = crate::jobs::service::create_job(&pool, new_job(recruiter.id, "Backend Engineer"))
            .await
            .unwrap();
        let llm = StubGenerator::replying(MATCHES_REPLY);

        let result = suggest_candidates(&pool, &llm, job.id).await.unwrap();

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].matching_score, 91);
        assert_eq!(
            store::users::credits_of(&pool, recruiter.id).await.unwrap(),
            Some(4)
        );
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Title: Backend Engineer"));
        assert!(prompts[0].contains("Email: ann@example.com"));
        // recruiters are not candidates
        assert!(!prompts[0].contains("Email: boss@example.com"));
    }

    #[tokio::test]
    async fn suggest_candidates_without_credits_never_calls_the_model() {
        let pool = test_pool().await;
        let recruiter = seed_user(&pool, "broke@example.com", Role::Recruiter).await;
        set_credits(&pool, recruiter.id, 0).await;
        let job = crate::jobs::service::create_job(&pool, new_job(recruiter.id, "Job"))
            .await
            .unwrap();
        let llm = StubGenerator::replying(MATCHES_REPLY);

        let err = suggest_candidates(&pool, &llm, job.id).await.unwrap_err();

        assert!(matches!(err, AppError::InsufficientCredits));
        assert!(llm.prompts().is_empty());
        assert_eq!(
            store::users::credits_of(&pool, recruiter.id).await.unwrap(),
            Some(0)
        );
    }

    #[tokio::test]
    async fn suggest_candidates_for_missing_job_is_not_found() {
        let pool = test_pool().await;
        let llm = StubGenerator::replying(MATCHES_REPLY);
        let err = suggest_candidates(&pool, &llm, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn recommend_jobs_returns_the_array_and_charges_the_user() {
        let pool = test_pool().await;
        let recruiter = seed_user(&pool, "boss@example.com", Role::Recruiter).await;
        let applicant = seed_user(&pool, "seeker@example.com", Role::Applicant).await;
        set_credits(&pool, applicant.id, 1).await;
        crate::jobs::service::create_job(&pool, new_job(recruiter.id, "Backend Engineer"))
            .await
            .unwrap();
        let llm = StubGenerator::replying(RECOMMENDATIONS_REPLY);

        let recs = recommend_jobs(&pool, &llm, applicant.id).await.unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].company, "Acme");
        assert_eq!(
            store::users::credits_of(&pool, applicant.id).await.unwrap(),
            Some(0)
        );

        let err = recommend_jobs(&pool, &llm, applicant.id).await.unwrap_err();
        assert!(matches!(err, AppError::InsufficientCredits));
        assert_eq!(llm.prompts().len(), 1);
    }

    #[tokio::test]
    async fn malformed_model_output_is_an_llm_error_after_the_charge() {
        let pool = test_pool().await;
        let applicant = seed_user(&pool, "seeker@example.com", Role::Applicant).await;
        let llm = StubGenerator::replying("sorry, no JSON today");

        let err = recommend_jobs(&pool, &llm, applicant.id).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
        assert_eq!(
            store::users::credits_of(&pool, applicant.id).await.unwrap(),
            Some(4)
        );
    }
}
