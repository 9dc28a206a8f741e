//! Gateway error types with HTTP status code mapping.
//!
//! [`OverlayError`] is the central error type. Each variant maps to an HTTP
//! status code. Validation failures are itemized as `{ "errors": [...] }`;
//! everything else uses the structured [`ErrorResponse`] body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "No file uploaded."
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Itemized validation failure body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Every structural problem found in the submission.
    pub errors: Vec<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Input      | 400 / 413 / 415           |
/// | 2000–2999 | Not Found  | 404 Not Found             |
/// | 3000–3999 | Server     | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// Submitted metadata failed structural validation.
    #[error("invalid configuration: {}", .0.join(" "))]
    Validation(Vec<String>),

    /// Required multipart field was absent.
    #[error("{0}")]
    MissingInput(String),

    /// Metadata field could not be parsed as JSON.
    #[error("{0}")]
    MalformedPayload(String),

    /// Uploaded file is not an accepted image format.
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// Uploaded file exceeds the byte ceiling.
    #[error("file exceeds the {limit} byte upload limit")]
    PayloadTooLarge {
        /// Configured ceiling in bytes.
        limit: usize,
    },

    /// No configuration exists for the store.
    #[error("configuration not found for store {0}")]
    NotFound(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Image file could not be written or removed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl OverlayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::MissingInput(_) => 1002,
            Self::MalformedPayload(_) => 1003,
            Self::UnsupportedMediaType(_) => 1004,
            Self::PayloadTooLarge { .. } => 1005,
            Self::NotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::Persistence(_) => 3001,
            Self::Storage(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MissingInput(_) | Self::MalformedPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for OverlayError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl IntoResponse for OverlayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = match self {
            Self::Validation(errors) => {
                axum::Json(ValidationErrorResponse { errors }).into_response()
            }
            other => {
                let body = ErrorResponse {
                    error: ErrorBody {
                        code: other.error_code(),
                        message: other.to_string(),
                    },
                };
                axum::Json(body).into_response()
            }
        };
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = OverlayError::Validation(vec!["Invalid or missing type.".to_string()]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = OverlayError::NotFound("default_store".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2001);
    }

    #[test]
    fn server_side_failures_map_to_500() {
        for err in [
            OverlayError::Persistence("gone".to_string()),
            OverlayError::Storage("disk full".to_string()),
            OverlayError::Internal("bug".to_string()),
        ] {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn missing_input_message_is_plain() {
        let err = OverlayError::MissingInput("No file uploaded.".to_string());
        assert_eq!(err.to_string(), "No file uploaded.");
    }
}
