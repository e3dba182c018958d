//! Test helpers: build the router over an in-memory storage fake.
//!
//! Run from workspace root: `cargo test -p imgvault-api`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use imgvault_api::setup::routes;
use imgvault_api::state::AppState;
use imgvault_core::Config;
use imgvault_storage::{Storage, StorageError, StorageResult};

/// Marker planted inside injected backend errors; must never surface in a
/// response body.
pub const SECRET_MARKER: &str = "AKIDEXAMPLESECRETKEY";

/// Failure to inject into the fake backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    None,
    PermissionDenied,
    Connection,
    BucketMissing,
}

/// In-memory storage fake: objects live in a map, failures are injectable.
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    fail_mode: Mutex<FailureMode>,
}

impl MemoryStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            objects: Mutex::new(HashMap::new()),
            fail_mode: Mutex::new(FailureMode::None),
        })
    }

    pub fn fail_with(&self, mode: FailureMode) {
        *self.fail_mode.lock().unwrap() = mode;
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn content_type_of(&self, key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|(_, ct)| ct.clone())
    }

    fn injected_failure(&self) -> Option<StorageError> {
        match *self.fail_mode.lock().unwrap() {
            FailureMode::None => None,
            FailureMode::PermissionDenied => Some(StorageError::PermissionDenied {
                code: "AccessDenied".to_string(),
            }),
            FailureMode::Connection => Some(StorageError::Connection(format!(
                "dispatch failure: credentials {} rejected by endpoint",
                SECRET_MARKER
            ))),
            FailureMode::BucketMissing => {
                Some(StorageError::BucketNotFound("test-bucket".to_string()))
            }
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String> {
        if let Some(err) = self.injected_failure() {
            return Err(err);
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (data, content_type.to_string()));
        Ok(format!("https://example.com/{}", key))
    }

    async fn head_bucket(&self) -> StorageResult<()> {
        match self.injected_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        server_port: 3000,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        s3_bucket: "test-bucket".to_string(),
        s3_region: "us-east-1".to_string(),
        s3_endpoint: None,
        upload_folder: "uploads".to_string(),
        storage_timeout_secs: 5,
        max_file_size_bytes: 100 * 1024,
        allowed_content_types: vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
            "image/webp".to_string(),
        ],
        max_files_per_request: 1,
    }
}

/// Build a test server over the real router with the given storage fake.
pub fn setup_test_server(storage: Arc<MemoryStorage>) -> TestServer {
    let config = test_config();
    let state = Arc::new(AppState::new(config.clone(), storage as Arc<dyn Storage>));
    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to start test server")
}
