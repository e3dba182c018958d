//! HTTP error response conversion
//!
//! Policy violations and storage failures are converted here into the wire
//! error shape. Violations map to 400 and keep their display message;
//! backend failures map to 500 with a class-level message plus the backend's
//! native code. The raw SDK error is logged server-side and never
//! serialized into the response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use imgvault_core::PolicyViolation;
use imgvault_storage::StorageError;
use serde::Serialize;

/// Wire shape for failed requests.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// An error ready to be serialized as an HTTP response.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl HttpError {
    /// Malformed or unreadable multipart body. The parser detail is logged,
    /// not returned.
    pub fn malformed_multipart(detail: String) -> Self {
        tracing::warn!(detail = %detail, "Rejected malformed multipart body");
        HttpError {
            status: StatusCode::BAD_REQUEST,
            code: "MALFORMED_MULTIPART",
            message: "Malformed multipart body".to_string(),
        }
    }

    /// JSON 404 for unknown routes.
    pub fn not_found() -> Self {
        HttpError {
            status: StatusCode::NOT_FOUND,
            code: "NOT_FOUND",
            message: "Endpoint not found".to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            message: self.message,
            code: self.code.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<PolicyViolation> for HttpError {
    fn from(violation: PolicyViolation) -> Self {
        // Expected client errors; keep noise out of the error log.
        tracing::debug!(violation = %violation, "Upload rejected by policy");

        let code = match &violation {
            PolicyViolation::MissingFile => "MISSING_FILE",
            PolicyViolation::TooLarge { .. } => "FILE_TOO_LARGE",
            PolicyViolation::TooManyFiles { .. } => "TOO_MANY_FILES",
            PolicyViolation::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
        };

        HttpError {
            status: StatusCode::BAD_REQUEST,
            code,
            message: violation.to_string(),
        }
    }
}

impl From<StorageError> for HttpError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, code = err.code(), "Storage backend failure");

        let message = match &err {
            StorageError::Connection(_) => "Could not reach the storage backend".to_string(),
            StorageError::CredentialsRejected { code, .. } => {
                format!("Storage credentials rejected ({})", code)
            }
            StorageError::BucketNotFound(bucket) => {
                format!("Storage bucket not found: {}", bucket)
            }
            StorageError::PermissionDenied { code } => {
                format!("Permission denied by storage backend ({})", code)
            }
            StorageError::Timeout(secs) => {
                format!("Storage write timed out after {} seconds", secs)
            }
            StorageError::PutFailed { code, .. } => format!("File upload failed ({})", code),
            StorageError::Config(_) => "Storage backend misconfigured".to_string(),
        };

        HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: err.code(),
            message,
        }
    }
}
