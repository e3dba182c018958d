//! Upload handler
//!
//! Extracts the multipart body into an [`UploadRequest`], runs the policy
//! validator (no storage I/O can happen before it passes), then hands the
//! file to the uploader and maps the outcome onto the wire shape.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::header::CONTENT_LENGTH,
    Json,
};
use imgvault_core::{FilePart, UploadRequest};
use serde::Serialize;

use crate::error::HttpError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[tracing::instrument(skip(state, multipart), fields(operation = "upload"))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpError> {
    let request = extract_upload_request(multipart).await?;

    if let Some(file) = &request.payload {
        if let Some(declared) = file.declared_size {
            let received = file.data.len() as u64;
            if declared != received {
                // Received byte count is authoritative; the declared value
                // is only ever a hint.
                tracing::warn!(
                    declared_size = declared,
                    received_size = received,
                    "Declared file size does not match received byte count"
                );
            }
        }
    }

    state.policy.validate(&request)?;
    let Some(file) = request.payload else {
        return Err(imgvault_core::PolicyViolation::MissingFile.into());
    };

    let stored = state.uploader.upload(file).await?;

    Ok(Json(UploadResponse {
        success: true,
        message: "File uploaded successfully".to_string(),
        image_url: Some(stored.url),
        file_name: Some(stored.key),
        original_name: Some(stored.original_filename),
        file_size: Some(stored.size),
    }))
}

/// Read the multipart body into an [`UploadRequest`].
///
/// Every part that arrives with a filename counts as a file part; the first
/// one becomes the payload. Later file parts are counted (for the
/// too-many-files check) but their bytes are not buffered.
async fn extract_upload_request(mut multipart: Multipart) -> Result<UploadRequest, HttpError> {
    let mut payload: Option<FilePart> = None;
    let mut file_part_count = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::malformed_multipart(e.to_string()))?
    {
        let Some(original_filename) = field.file_name().map(String::from) else {
            continue;
        };
        file_part_count += 1;

        if payload.is_some() {
            continue;
        }

        let content_type = field
            .content_type()
            .map(String::from)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let declared_size = field
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let data = field
            .bytes()
            .await
            .map_err(|e| HttpError::malformed_multipart(e.to_string()))?;

        payload = Some(FilePart {
            data: data.to_vec(),
            original_filename,
            content_type,
            declared_size,
        });
    }

    Ok(UploadRequest::new(payload, file_part_count))
}
