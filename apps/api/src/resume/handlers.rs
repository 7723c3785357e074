use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
};
use tracing::info;

use crate::errors::AppError;
use crate::resume::parser::parse_resume;
use crate::state::AppState;

/// POST /upload
/// Multipart field `resume` holding a PDF. Responds with the model's JSON.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut pdf = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("resume") {
            let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
            let data = field.bytes().await?;
            info!(file_name = %file_name, bytes = data.len(), "resume received");
            pdf = Some(data);
            break;
        }
    }
    let pdf = pdf.ok_or_else(|| AppError::Validation("Resume file is required".to_string()))?;

    let json = parse_resume(state.llm.as_ref(), pdf).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json))
}
