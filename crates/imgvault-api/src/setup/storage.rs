//! Storage setup and initialization

use std::sync::Arc;

use anyhow::Result;
use imgvault_core::Config;
use imgvault_storage::{S3Storage, Storage};

/// Build the S3 storage backend from configuration.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage backend...");

    let storage = S3Storage::new(
        config.s3_bucket.clone(),
        config.s3_region.clone(),
        config.s3_endpoint.clone(),
    )
    .await?;

    tracing::info!(
        bucket = %config.s3_bucket,
        region = %config.s3_region,
        endpoint = ?config.s3_endpoint,
        "Storage backend initialized successfully"
    );

    Ok(Arc::new(storage))
}
