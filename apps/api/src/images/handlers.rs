use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::images::profile_image_key;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ImageUploadResponse {
    pub image_url: String,
}

/// POST /upload/profile-image
pub async fn handle_upload_profile_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImageUploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("image").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(AppError::Validation("Image is required".to_string()));
        }

        let key = profile_image_key(&file_name);
        let image_url = state
            .images
            .upload_image(&key, data, &content_type)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        return Ok(Json(ImageUploadResponse { image_url }));
    }

    Err(AppError::Validation("Image is required".to_string()))
}
