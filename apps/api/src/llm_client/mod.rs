//! LLM Client: the single point of entry for all generative-text calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! Services depend on the `TextGenerator` trait so tests can swap in a stub.
//!
//! Model: gemini-1.5-flash (hardcoded, do not make configurable to prevent drift)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

pub mod prompts;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
/// The model used for all LLM calls.
pub const MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("could not decode model output ({source}): {raw}")]
    Parse {
        source: serde_json::Error,
        raw: String,
    },
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Anything that turns a prompt into model text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Wraps the Gemini `generateContent` endpoint. One attempt per call;
/// failures are surfaced to the caller.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: String, api_base: Option<&str>) -> anyhow::Result<Self> {
        let base = api_base.unwrap_or(DEFAULT_API_BASE).trim_end_matches('/');
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(120)).build()?,
            api_key,
            endpoint: format!("{base}/models/{MODEL}:generateContent"),
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        info!(model = MODEL, prompt_chars = prompt.len(), "calling LLM");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            error!(status = status.as_u16(), "LLM API returned an error: {message}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: GenerateResponse = response.json().await?;
        let text = envelope.text().ok_or(LlmError::EmptyContent)?;
        debug!(response_chars = text.len(), "LLM call succeeded");
        Ok(text.to_string())
    }
}

/// Calls the model and decodes the JSON in its answer into `T`.
/// The prompt must instruct the model to return JSON.
pub async fn call_json<T: DeserializeOwned>(
    llm: &dyn TextGenerator,
    prompt: &str,
) -> Result<T, LlmError> {
    let text = llm.generate(prompt).await?;
    let json = extract_json_block(&text);
    serde_json::from_str(json).map_err(|source| {
        error!("could not decode model output: {source}; raw: {text}");
        LlmError::Parse {
            source,
            raw: text.clone(),
        }
    })
}

/// Pulls the JSON payload out of a model answer.
///
/// A block fenced with ```json wins wherever it appears; otherwise a bare
/// ``` fence around the whole answer is stripped; otherwise the trimmed
/// answer is returned as is.
pub fn extract_json_block(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let inner = &text[start + "```json".len()..];
        return match inner.find("```") {
            Some(end) => inner[..end].trim(),
            None => inner.trim(),
        };
    }

    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```") {
        return stripped.strip_suffix("```").unwrap_or(stripped).trim();
    }
    text
}
