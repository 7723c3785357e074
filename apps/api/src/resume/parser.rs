use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{extract_json_block, TextGenerator};
use crate::resume::pdf::{extract_pdf_text, sanitize_text};
use crate::resume::prompts::build_resume_parse_prompt;

/// PDF bytes → structured profile JSON, as text.
pub async fn parse_resume(llm: &dyn TextGenerator, pdf: Bytes) -> Result<String, AppError> {
    let text = extract_pdf_text(pdf).await?;
    parse_resume_text(llm, &text).await
}

/// Sends extracted resume text to the model and returns the JSON it
/// produced. The output is passed through without schema validation.
pub async fn parse_resume_text(llm: &dyn TextGenerator, raw_text: &str) -> Result<String, AppError> {
    let sanitized = sanitize_text(raw_text);
    let prompt = build_resume_parse_prompt(&sanitized);

    let answer = llm.generate(&prompt).await?;
    let json = extract_json_block(&answer).to_string();

    info!(
        text_chars = sanitized.len(),
        json_chars = json.len(),
        "resume parsed"
    );
    Ok(json)
}
