//! Storage abstraction trait
//!
//! This module defines the Storage trait the upload pipeline writes through,
//! and the error taxonomy backend failures are classified into. Variants
//! carry the backend's native error code for diagnostics; how much of that
//! reaches a client is decided at the HTTP boundary, not here.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage connection failed: {0}")]
    Connection(String),

    #[error("Storage credentials rejected ({code}): {message}")]
    CredentialsRejected { code: String, message: String },

    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    #[error("Permission denied by storage backend ({code})")]
    PermissionDenied { code: String },

    #[error("Storage write timed out after {0} seconds")]
    Timeout(u64),

    #[error("Upload failed ({code}): {message}")]
    PutFailed { code: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StorageError {
    /// Stable machine-readable code for this failure class.
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::Connection(_) => "STORAGE_CONNECTION",
            StorageError::CredentialsRejected { .. } => "STORAGE_CREDENTIALS",
            StorageError::BucketNotFound(_) => "STORAGE_BUCKET_NOT_FOUND",
            StorageError::PermissionDenied { .. } => "STORAGE_PERMISSION_DENIED",
            StorageError::Timeout(_) => "STORAGE_TIMEOUT",
            StorageError::PutFailed { .. } => "STORAGE_UPLOAD_FAILED",
            StorageError::Config(_) => "STORAGE_CONFIG",
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The backend is an opaque remote collaborator: one atomic object write
/// plus a connectivity probe. No multi-part orchestration, no deletes, no
/// reads; failure of a write leaves nothing behind that other requests can
/// observe.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a single object under `key`, tagged with `content_type`,
    /// and return the backend-reported public URL.
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Lightweight existence check against the configured bucket.
    async fn head_bucket(&self) -> StorageResult<()>;
}
