use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use crate::models::user::{
    Education, EducationInput, Experience, ExperienceInput, NewUser, Role, User,
};

pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_role(pool: &SqlitePool, role: Role) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE role = ? ORDER BY full_name, email")
        .bind(role)
        .fetch_all(pool)
        .await
}

/// Inserts the user row. Runs inside the caller's transaction during signup.
pub async fn insert_user<'e, E>(executor: E, user: &NewUser) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO users (
            id, full_name, title, location, email, password_hash, phone,
            current_company, linkedin, github, portfolio, skills, image, role
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user.id)
    .bind(&user.full_name)
    .bind(&user.title)
    .bind(&user.location)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.phone)
    .bind(&user.current_company)
    .bind(&user.linkedin)
    .bind(&user.github)
    .bind(&user.portfolio)
    .bind(&user.skills)
    .bind(&user.image)
    .bind(user.role)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_education<'e, E>(
    executor: E,
    user_id: Uuid,
    education: &EducationInput,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO educations (id, user_id, institution, location, degree, gpa, years)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&education.institution)
    .bind(&education.location)
    .bind(&education.degree)
    .bind(&education.gpa)
    .bind(&education.years)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_experience<'e, E>(
    executor: E,
    user_id: Uuid,
    experience: &ExperienceInput,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO experiences (id, user_id, company, location, title, years, description)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&experience.company)
    .bind(&experience.location)
    .bind(&experience.title)
    .bind(&experience.years)
    .bind(&experience.description)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn educations_for(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Education>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM educations WHERE user_id = ? ORDER BY rowid")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn experiences_for(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<Experience>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM experiences WHERE user_id = ? ORDER BY rowid")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Returns the number of rows updated (0 when the email is unknown).
pub async fn update_password_hash(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET password_hash = ? WHERE email = ?")
        .bind(password_hash)
        .bind(email)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_applications(pool: &SqlitePool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM job_applications WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn credits_of(pool: &SqlitePool, user_id: Uuid) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT credits FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
