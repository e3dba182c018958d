//! Imgvault API Library
//!
//! This crate provides the HTTP handlers, error mapping, and application
//! setup for the upload service.

// Module declarations
mod handlers;
mod services;
mod telemetry;

// Public modules
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorBody;
pub use services::uploader::{StoredUpload, Uploader};
