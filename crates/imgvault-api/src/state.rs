//! Application state.
//!
//! One immutable state object built at startup and shared behind `Arc`.
//! Configuration is passed in explicitly so the pipeline is testable
//! without environment mutation.

use std::sync::Arc;
use std::time::Duration;

use imgvault_core::{Config, UploadPolicy};
use imgvault_storage::Storage;

use crate::services::uploader::Uploader;

pub struct AppState {
    pub config: Config,
    pub policy: UploadPolicy,
    pub storage: Arc<dyn Storage>,
    pub uploader: Uploader,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let policy = config.upload_policy();
        let uploader = Uploader::new(
            storage.clone(),
            config.upload_folder.clone(),
            Duration::from_secs(config.storage_timeout_secs),
        );

        Self {
            config,
            policy,
            storage,
            uploader,
        }
    }
}
