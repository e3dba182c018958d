//! Upload policy and validation.
//!
//! The validator runs before any storage I/O. Size checks use the byte count
//! actually received, never the client-declared value; declared media types
//! are matched case-sensitively against a fixed allowlist, with no content
//! sniffing.

/// A single file part extracted from a multipart request.
///
/// `declared_size` is whatever the client claimed for the part, if anything.
/// It is informational only: the payload length is authoritative.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub data: Vec<u8>,
    pub original_filename: String,
    pub content_type: String,
    pub declared_size: Option<u64>,
}

/// An incoming upload as seen by the validator.
///
/// `payload` is `None` when the request carried no file part at all;
/// `file_part_count` counts every part that arrived with a filename,
/// including ones beyond the first.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub payload: Option<FilePart>,
    pub file_part_count: usize,
}

impl UploadRequest {
    pub fn new(payload: Option<FilePart>, file_part_count: usize) -> Self {
        Self {
            payload,
            file_part_count,
        }
    }
}

/// Policy violations, in the order they are checked.
#[derive(Debug, thiserror::Error)]
pub enum PolicyViolation {
    #[error("No file uploaded")]
    MissingFile,

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: usize, max: usize },

    #[error("Too many files: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("Unsupported media type: {content_type} (allowed: {})", .allowed.join(", "))]
    UnsupportedType {
        content_type: String,
        allowed: Vec<String>,
    },
}

/// The configured set of acceptance rules an upload is checked against.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    allowed_types: Vec<String>,
    max_size_bytes: usize,
    max_files: usize,
}

impl UploadPolicy {
    pub fn new(allowed_types: Vec<String>, max_size_bytes: usize, max_files: usize) -> Self {
        Self {
            allowed_types,
            max_size_bytes,
            max_files,
        }
    }

    pub fn allowed_types(&self) -> &[String] {
        &self.allowed_types
    }

    pub fn max_size_bytes(&self) -> usize {
        self.max_size_bytes
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// Validate an upload against this policy.
    ///
    /// Checks run in a fixed order and the first violation is returned:
    /// missing file, size, file count, media type. The size boundary is
    /// inclusive: a payload of exactly `max_size_bytes` is accepted.
    pub fn validate(&self, request: &UploadRequest) -> Result<(), PolicyViolation> {
        let file = request.payload.as_ref().ok_or(PolicyViolation::MissingFile)?;

        let size = file.data.len();
        if size > self.max_size_bytes {
            return Err(PolicyViolation::TooLarge {
                size,
                max: self.max_size_bytes,
            });
        }

        if request.file_part_count > self.max_files {
            return Err(PolicyViolation::TooManyFiles {
                count: request.file_part_count,
                max: self.max_files,
            });
        }

        // Exact-string membership; "IMAGE/JPEG" or "image/jpeg; charset=x"
        // are not members of {image/jpeg}.
        if !self.allowed_types.iter().any(|t| t == &file.content_type) {
            return Err(PolicyViolation::UnsupportedType {
                content_type: file.content_type.clone(),
                allowed: self.allowed_types.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_policy() -> UploadPolicy {
        UploadPolicy::new(
            vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
            100 * 1024,
            1,
        )
    }

    fn file_part(size: usize, content_type: &str) -> FilePart {
        FilePart {
            data: vec![0u8; size],
            original_filename: "photo.jpg".to_string(),
            content_type: content_type.to_string(),
            declared_size: None,
        }
    }

    fn request(size: usize, content_type: &str) -> UploadRequest {
        UploadRequest::new(Some(file_part(size, content_type)), 1)
    }

    #[test]
    fn accepts_payload_within_limits() {
        let policy = test_policy();
        assert!(policy.validate(&request(50 * 1024, "image/jpeg")).is_ok());
    }

    #[test]
    fn accepts_payload_at_exact_boundary() {
        let policy = test_policy();
        assert!(policy.validate(&request(100 * 1024, "image/png")).is_ok());
    }

    #[test]
    fn rejects_payload_one_byte_over_boundary() {
        let policy = test_policy();
        assert!(matches!(
            policy.validate(&request(100 * 1024 + 1, "image/png")),
            Err(PolicyViolation::TooLarge { size, max })
                if size == 100 * 1024 + 1 && max == 100 * 1024
        ));
    }

    #[test]
    fn accepts_empty_payload() {
        // An empty file part is still a present payload of size 0.
        let policy = test_policy();
        assert!(policy.validate(&request(0, "image/webp")).is_ok());
    }

    #[test]
    fn rejects_missing_file() {
        let policy = test_policy();
        let request = UploadRequest::new(None, 0);
        assert!(matches!(
            policy.validate(&request),
            Err(PolicyViolation::MissingFile)
        ));
    }

    #[test]
    fn rejects_too_many_files() {
        let policy = test_policy();
        let request = UploadRequest::new(Some(file_part(1024, "image/jpeg")), 2);
        assert!(matches!(
            policy.validate(&request),
            Err(PolicyViolation::TooManyFiles { count: 2, max: 1 })
        ));
    }

    #[test]
    fn rejects_unsupported_type() {
        let policy = test_policy();
        assert!(matches!(
            policy.validate(&request(1024, "application/pdf")),
            Err(PolicyViolation::UnsupportedType { .. })
        ));
    }

    #[test]
    fn type_matching_is_case_sensitive() {
        let policy = test_policy();
        assert!(matches!(
            policy.validate(&request(1024, "IMAGE/JPEG")),
            Err(PolicyViolation::UnsupportedType { .. })
        ));
    }

    #[test]
    fn type_matching_ignores_byte_content() {
        // A PDF payload declared as image/png passes; no sniffing.
        let policy = test_policy();
        let mut part = file_part(1024, "image/png");
        part.data[..4].copy_from_slice(b"%PDF");
        let request = UploadRequest::new(Some(part), 1);
        assert!(policy.validate(&request).is_ok());
    }

    #[test]
    fn missing_file_reported_before_count_violation() {
        // Extra parts without any file payload still report MissingFile first.
        let policy = test_policy();
        let request = UploadRequest::new(None, 3);
        assert!(matches!(
            policy.validate(&request),
            Err(PolicyViolation::MissingFile)
        ));
    }

    #[test]
    fn size_violation_reported_before_type_violation() {
        let policy = test_policy();
        assert!(matches!(
            policy.validate(&request(200 * 1024, "application/pdf")),
            Err(PolicyViolation::TooLarge { .. })
        ));
    }

    #[test]
    fn size_violation_reported_before_count_violation() {
        let policy = test_policy();
        let request = UploadRequest::new(Some(file_part(200 * 1024, "image/jpeg")), 2);
        assert!(matches!(
            policy.validate(&request),
            Err(PolicyViolation::TooLarge { .. })
        ));
    }
}
