//! Configuration module
//!
//! Process-wide configuration is loaded once from the environment into an
//! immutable `Config` that is passed into the components at construction.
//! Missing required settings are a startup failure; the server never starts
//! half-configured.

use std::env;

use crate::policy::UploadPolicy;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_FILE_SIZE_KB: usize = 100;
const DEFAULT_MAX_FILES_PER_REQUEST: usize = 1;
const DEFAULT_STORAGE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_UPLOAD_FOLDER: &str = "uploads";
const DEFAULT_ALLOWED_CONTENT_TYPES: &str = "image/jpeg,image/png,image/webp";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    // Storage configuration
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers
    pub upload_folder: String,
    pub storage_timeout_secs: u64,
    // Upload policy
    pub max_file_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
    pub max_files_per_request: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_file_size_kb = env::var("MAX_FILE_SIZE_KB")
            .unwrap_or_else(|_| DEFAULT_MAX_FILE_SIZE_KB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_KB);

        // Exact strings; membership checks are case-sensitive so the
        // allowlist is stored as configured.
        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_CONTENT_TYPES.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            s3_bucket: env::var("S3_BUCKET")
                .map_err(|_| anyhow::anyhow!("S3_BUCKET must be set"))?,
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .map_err(|_| anyhow::anyhow!("S3_REGION or AWS_REGION must be set"))?,
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
            upload_folder: env::var("S3_UPLOAD_FOLDER")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_FOLDER.to_string()),
            storage_timeout_secs: env::var("STORAGE_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_STORAGE_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_STORAGE_TIMEOUT_SECS),
            max_file_size_bytes: max_file_size_kb * 1024,
            allowed_content_types,
            max_files_per_request: env::var("MAX_FILES_PER_REQUEST")
                .unwrap_or_else(|_| DEFAULT_MAX_FILES_PER_REQUEST.to_string())
                .parse()
                .unwrap_or(DEFAULT_MAX_FILES_PER_REQUEST),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.s3_bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("S3_BUCKET must not be empty"));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_KB must be greater than 0"));
        }

        if self.allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_CONTENT_TYPES must list at least one media type"
            ));
        }

        if self.max_files_per_request == 0 {
            return Err(anyhow::anyhow!(
                "MAX_FILES_PER_REQUEST must be greater than 0"
            ));
        }

        if self.upload_folder.contains('/') || self.upload_folder.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "S3_UPLOAD_FOLDER must be a single non-empty path segment"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Build the upload policy from the configured limits.
    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(
            self.allowed_content_types.clone(),
            self.max_file_size_bytes,
            self.max_files_per_request,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 3000,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            s3_bucket: "test-bucket".to_string(),
            s3_region: "us-east-1".to_string(),
            s3_endpoint: None,
            upload_folder: "uploads".to_string(),
            storage_timeout_secs: 30,
            max_file_size_bytes: 100 * 1024,
            allowed_content_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
            max_files_per_request: 1,
        }
    }

    #[test]
    fn validate_accepts_development_wildcard_cors() {
        let config = test_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_wildcard_cors_in_production() {
        let mut config = test_config();
        config.environment = "production".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_bucket() {
        let mut config = test_config();
        config.s3_bucket = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_nested_upload_folder() {
        let mut config = test_config();
        config.upload_folder = "a/b".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn upload_policy_carries_configured_limits() {
        let config = test_config();
        let policy = config.upload_policy();
        assert_eq!(policy.max_size_bytes(), 100 * 1024);
        assert_eq!(policy.max_files(), 1);
    }
}
