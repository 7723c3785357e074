use bytes::Bytes;
use tracing::warn;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Extracts the text layer of a PDF held in memory.
///
/// Extraction is CPU-bound and the library can panic on malformed input, so
/// it runs on the blocking pool; a panic surfaces as a failed join.
pub async fn extract_pdf_text(data: Bytes) -> Result<String, AppError> {
    if !data.starts_with(PDF_MAGIC) {
        return Err(AppError::Extraction("file is not a PDF".to_string()));
    }

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| {
            warn!("pdf extraction task failed: {e}");
            AppError::Extraction("PDF could not be read".to_string())
        })?
        .map_err(|e| AppError::Extraction(format!("PDF extraction error: {e}")))?;

    if text.trim().is_empty() {
        return Err(AppError::Extraction(
            "PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}

/// Makes extracted text safe to embed inside a quoted prompt section:
/// double quotes become single quotes; control characters (below 32, plus
/// DEL) become spaces.
pub fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '"' => '\'',
            c if (c as u32) < 32 || c == '\u{7f}' => ' ',
            c => c,
        })
        .collect()
}
