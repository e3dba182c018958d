//! Imgvault Storage Library
//!
//! This crate provides the storage abstraction and the S3 implementation.
//! The trait is deliberately narrow: a single-object write and a bucket
//! existence check are all the upload pipeline needs, and keeping it small
//! lets the pipeline be tested against an in-memory fake.
//!
//! # Storage key format
//!
//! Keys are `{folder}/{unix_millis}_{disambiguator}{.ext}`: a configured
//! folder prefix, the upload time in Unix milliseconds, a 6-character random
//! alphanumeric disambiguator, and the original filename's extension
//! lower-cased (omitted when the filename has none). Key generation is
//! centralized in the `keys` module.

pub mod keys;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use keys::{generate_object_key, parse_object_key, KeyParts};
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
