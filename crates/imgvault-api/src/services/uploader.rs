//! Upload service
//!
//! The uploader owns the storage-facing half of the pipeline: derive a
//! collision-resistant key, issue the single remote write under a
//! request-scoped deadline, and hand back the data the response is built
//! from. Validation has already happened by the time a file reaches it.

use std::sync::Arc;
use std::time::Duration;

use imgvault_core::FilePart;
use imgvault_storage::{generate_object_key, Storage, StorageError};
use uuid::Uuid;

/// Outcome of a successful upload.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub key: String,
    pub url: String,
    pub original_filename: String,
    pub size: u64,
}

#[derive(Clone)]
pub struct Uploader {
    storage: Arc<dyn Storage>,
    folder: String,
    write_deadline: Duration,
}

impl Uploader {
    pub fn new(storage: Arc<dyn Storage>, folder: String, write_deadline: Duration) -> Self {
        Self {
            storage,
            folder,
            write_deadline,
        }
    }

    /// Write a validated file to storage under a freshly generated key.
    ///
    /// Exactly one object is created per successful call; no retries are
    /// attempted here. An unbounded backend hang would pin request capacity,
    /// so the write runs under `write_deadline`.
    pub async fn upload(&self, file: FilePart) -> Result<StoredUpload, StorageError> {
        let upload_id = Uuid::new_v4();
        let key = generate_object_key(&self.folder, &file.original_filename);
        let size = file.data.len() as u64;

        tracing::info!(
            upload_id = %upload_id,
            key = %key,
            original_filename = %file.original_filename,
            content_type = %file.content_type,
            size_bytes = size,
            "Processing upload"
        );

        let write = self
            .storage
            .put_object(&key, file.data, &file.content_type);
        let url = match tokio::time::timeout(self.write_deadline, write).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::error!(
                    upload_id = %upload_id,
                    key = %key,
                    deadline_secs = self.write_deadline.as_secs(),
                    "Storage write exceeded request deadline"
                );
                return Err(StorageError::Timeout(self.write_deadline.as_secs()));
            }
        };

        tracing::info!(
            upload_id = %upload_id,
            key = %key,
            url = %url,
            "Upload to storage successful"
        );

        Ok(StoredUpload {
            key,
            url,
            original_filename: file.original_filename,
            size,
        })
    }
}
