//! Generic multipart file upload into the shared temp area.

use axum::{Json, extract::Multipart};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

use super::error::ApiError;

// POST /upload
pub async fn upload(mut multipart: Multipart) -> Result<Json<Value>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "upload.bin".to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        let path = std::env::temp_dir().join(format!(
            "qllama_upload_{}_{}",
            Utc::now().timestamp(),
            filename
        ));
        tokio::fs::write(&path, &data)
            .await
            .map_err(|_| ApiError::internal("Failed to save file"))?;

        info!(filename = %filename, bytes = data.len(), "File uploaded");

        return Ok(Json(json!({
            "message": "File uploaded successfully",
            "filename": filename,
            "path": path.to_string_lossy(),
        })));
    }

    Err(ApiError::bad_request("No file uploaded"))
}
