//! Shared fixtures for unit and router tests: an in-memory database with
//! migrations applied, stub collaborators, and request helpers.

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bytes::Bytes;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tower::ServiceExt;
use uuid::Uuid;

use crate::auth::tokens::JwtKeys;
use crate::images::ImageStore;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::job::NewJob;
use crate::models::user::{NewUser, Role, User};
use crate::payments::PaymentVerifier;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;
use crate::store;

pub const TEST_ORIGIN: &str = "https://frontend.test";
pub const TEST_JWT_SECRET: &str = "test-secret";
pub const MULTIPART_BOUNDARY: &str = "jobmatch-test-boundary";

/// A single long-lived connection: every connection to `:memory:` would
/// otherwise see its own empty database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub fn test_state(pool: SqlitePool, llm: StubGenerator) -> AppState {
    AppState {
        db: pool,
        llm: Arc::new(llm),
        images: Arc::new(FakeImageStore),
        payments: Arc::new(StaticPaymentVerifier(true)),
        jwt: JwtKeys::new(TEST_JWT_SECRET),
    }
}

pub fn test_app(state: AppState) -> Router {
    build_router(state).layer(cors_layer(TEST_ORIGIN).unwrap())
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body)
}

pub fn read_json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap()
}

/// Inserts a user directly. The stored hash is not a real one, so seeded
/// users cannot log in.
pub async fn seed_user(pool: &SqlitePool, email: &str, role: Role) -> User {
    let id = Uuid::new_v4();
    let new_user = NewUser {
        id,
        full_name: email.split('@').next().unwrap_or(email).to_string(),
        title: String::new(),
        location: "Lisbon".to_string(),
        email: email.to_string(),
        password_hash: "seeded".to_string(),
        phone: String::new(),
        current_company: String::new(),
        linkedin: String::new(),
        github: String::new(),
        portfolio: String::new(),
        skills: "rust".to_string(),
        image: String::new(),
        role,
    };
    store::users::insert_user(pool, &new_user).await.unwrap();
    store::users::find_by_id(pool, id).await.unwrap().unwrap()
}

pub async fn set_credits(pool: &SqlitePool, user_id: Uuid, credits: i64) {
    sqlx::query("UPDATE users SET credits = ? WHERE id = ?")
        .bind(credits)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

pub fn new_job(recruiter_id: Uuid, title: &str) -> NewJob {
    NewJob {
        title: title.to_string(),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        salary_min: 50_000,
        salary_max: 90_000,
        job_type: "full-time".to_string(),
        description: "Ship things".to_string(),
        tags: "rust".to_string(),
        recruiter_id,
    }
}

/// One-file multipart body using `MULTIPART_BOUNDARY`.
pub fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

/// A one-page PDF whose text layer holds `line` in Helvetica. `line` must
/// not contain parentheses or backslashes.
pub fn text_pdf(line: &str) -> Vec<u8> {
    let content = format!("BT /F1 18 Tf 72 720 Td ({line}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }
    let xref_at = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        pdf.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.into_bytes()
}

/// Replies with a fixed answer (or a fixed failure) and records prompts.
pub struct StubGenerator {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or(LlmError::Api {
            status: 503,
            message: "stub outage".to_string(),
        })
    }
}

pub struct FakeImageStore;

#[async_trait]
impl ImageStore for FakeImageStore {
    async fn upload_image(&self, key: &str, _body: Bytes, _content_type: &str) -> anyhow::Result<String> {
        Ok(format!("https://images.test/{key}"))
    }
}

pub struct StaticPaymentVerifier(pub bool);

#[async_trait]
impl PaymentVerifier for StaticPaymentVerifier {
    async fn verify(&self, _tx_hash: &str) -> bool {
        self.0
    }
}
