//! Health check handlers and response types.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, Json};
use chrono::Utc;
use imgvault_storage::StorageError;
use serde::Serialize;

use crate::error::HttpError;
use crate::state::AppState;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub supported_formats: Vec<String>,
    pub max_file_size_bytes: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageHealthResponse {
    pub status: String,
    pub bucket: String,
    pub region: String,
}

/// Static capability description; 200 whenever the process is alive.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server is running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        supported_formats: state.policy.allowed_types().to_vec(),
        max_file_size_bytes: state.policy.max_size_bytes(),
    })
}

/// Storage connectivity probe: bucket existence check, no request data.
pub async fn storage_health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StorageHealthResponse>, HttpError> {
    match tokio::time::timeout(PROBE_TIMEOUT, state.storage.head_bucket()).await {
        Ok(Ok(())) => Ok(Json(StorageHealthResponse {
            status: "Storage connection successful".to_string(),
            bucket: state.config.s3_bucket.clone(),
            region: state.config.s3_region.clone(),
        })),
        Ok(Err(e)) => Err(e.into()),
        Err(_) => Err(StorageError::Timeout(PROBE_TIMEOUT.as_secs()).into()),
    }
}
