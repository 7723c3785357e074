// Prompts for AI matching in both directions.
// Profile sections are assembled with `format!` so user-supplied text is
// never re-scanned for placeholders.

use std::fmt::Write;

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::models::job::Job;
use crate::models::user::{Experience, User};

const CANDIDATE_MATCH_PREAMBLE: &str = "You are an AI recruitment assistant.
Analyze the job below and match it with the best candidates.";

const CANDIDATE_MATCH_SCHEMA: &str = r#"Respond only with a valid JSON in the following format:
{
  "matches": [
    {
      "name": "Candidate Name",
      "email": "email@example.com",
      "matching_score": 0-100,
      "reasoning": "explanation",
      "recommended": true/false
    }
  ]
}"#;

const JOB_RECOMMENDATION_PREAMBLE: &str = "You are an AI career advisor.
Suggest jobs for the following user based on their profile.";

const JOB_RECOMMENDATION_SCHEMA: &str = r#"Respond only with a valid JSON like this:
{
  "recommendations": [
    {
      "title": "Job Title",
      "company": "Company Name",
      "matching_score": 0-100,
      "reasoning": "Why it's a match",
      "recommended": true/false
    }
  ]
}"#;

/// A user together with the experience rows the prompt lists for them.
pub struct ProfileWithExperience<'a> {
    pub user: &'a User,
    pub experience: &'a [Experience],
}

fn render_job(job: &Job) -> String {
    format!(
        "Title: {}\nCompany: {}\nLocation: {}\nTags: {}\nDescription: {}\n",
        job.title, job.company, job.location, job.tags, job.description
    )
}

fn render_experience(experience: &[Experience]) -> String {
    if experience.is_empty() {
        return "none listed".to_string();
    }
    experience
        .iter()
        .map(|e| {
            let mut line = format!("{} at {}", e.title, e.company);
            if !e.years.is_empty() {
                let _ = write!(line, " ({})", e.years);
            }
            if !e.description.is_empty() {
                let _ = write!(line, ": {}", e.description);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn render_profile(profile: &ProfileWithExperience<'_>) -> String {
    let user = profile.user;
    format!(
        "Name: {}\nEmail: {}\nLocation: {}\nSkills: {}\nExperience: {}\n",
        user.full_name,
        user.email,
        user.location,
        user.skills,
        render_experience(profile.experience)
    )
}

/// Job profile first, then every candidate, then the expected JSON shape.
pub fn build_candidate_match_prompt(job: &Job, candidates: &[ProfileWithExperience<'_>]) -> String {
    let mut prompt = format!(
        "{CANDIDATE_MATCH_PREAMBLE}\n\nJob Profile:\n{}\nCandidates:\n",
        render_job(job)
    );
    for candidate in candidates {
        prompt.push('\n');
        prompt.push_str(&render_profile(candidate));
    }
    prompt.push('\n');
    prompt.push_str(CANDIDATE_MATCH_SCHEMA);
    prompt.push_str("\n\n");
    prompt.push_str(JSON_ONLY_INSTRUCTION);
    prompt
}

/// User profile first, then every job, then the expected JSON shape.
pub fn build_job_recommendation_prompt(user: &ProfileWithExperience<'_>, jobs: &[Job]) -> String {
    let mut prompt = format!(
        "{JOB_RECOMMENDATION_PREAMBLE}\n\nUser Profile:\n{}\nJobs:\n",
        render_profile(user)
    );
    for job in jobs {
        prompt.push('\n');
        prompt.push_str(&render_job(job));
    }
    prompt.push('\n');
    prompt.push_str(JOB_RECOMMENDATION_SCHEMA);
    prompt.push_str("\n\n");
    prompt.push_str(JSON_ONLY_INSTRUCTION);
    prompt
}
