//! # Error Handling
//!
//! Unified error handling for the inquiry API: a problem+json response body
//! with trace ID propagation, plus the storage error taxonomy shared by every
//! [`InquiryStore`](crate::repositories::InquiryStore) implementation.

use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::schema::FieldErrors;
use crate::telemetry;

pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";

/// Retry hint sent with a 503; matches the SQLite busy timeout.
pub const STORAGE_RETRY_AFTER_SECS: u64 = 5;

/// Unified API error response structure
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// HTTP status code for the response
    #[serde(skip_serializing, skip_deserializing)]
    pub status: StatusCode,
    /// Error code for programmatic handling
    pub code: Box<str>,
    /// Human-readable error message
    pub message: Box<str>,
    /// Field name to message map for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Box<serde_json::Value>>,
    /// Suggested retry delay in seconds (optional)
    pub retry_after: Option<u64>,
    /// Correlation trace ID for debugging (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<Box<str>>,
}

impl ApiError {
    /// Create a new API error with the given status code and message
    pub fn new<S: Into<String>>(status: StatusCode, code: S, message: S) -> Self {
        Self {
            status,
            code: code.into().into_boxed_str(),
            message: message.into().into_boxed_str(),
            details: None,
            retry_after: None,
            trace_id: Self::current_trace_id(),
        }
    }

    /// Add details to the error
    pub fn with_details<V: Into<serde_json::Value>>(mut self, details: V) -> Self {
        self.details = Some(Box::new(details.into()));
        self
    }

    /// Set retry after delay
    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    /// Extract current trace ID from the active request (falls back to a generated correlation ID)
    fn current_trace_id() -> Option<Box<str>> {
        telemetry::current_trace_id()
            .map(|trace_id| trace_id.into_boxed_str())
            .or_else(|| {
                Some(format!("corr-{}", &uuid::Uuid::new_v4().to_string()[..8]).into_boxed_str())
            })
    }
}

/// Standard error types with predefined status codes
#[derive(Debug, Error)]
pub enum ErrorType {
    #[error("Request body is not a valid inquiry")]
    BadRequest,
    #[error("Payload Too Large")]
    PayloadTooLarge,
    #[error("An internal error occurred")]
    InternalServerError,
}

impl ErrorType {
    /// Get the appropriate HTTP status code for this error type
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorType::BadRequest => StatusCode::BAD_REQUEST,
            ErrorType::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorType::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorType::BadRequest => VALIDATION_FAILED,
            ErrorType::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ErrorType::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

/// Failure of the persistence layer to complete an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The database could not be reached, or is locked by another writer.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// A statement reached the database but did not complete.
    #[error("storage operation failed: {0}")]
    Operation(String),
    /// A stored row could not be decoded.
    #[error("stored inquiry {id} is corrupt: {reason}")]
    Corrupt { id: i32, reason: String },
}

impl StorageError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_))
    }
}

// SQLITE_BUSY, SQLITE_LOCKED and their extended codes.
const SQLITE_BUSY_CODES: &[&str] = &["5", "6", "261", "262", "517"];

fn is_busy_or_locked(error: &sea_orm::DbErr) -> bool {
    use sea_orm::RuntimeErr;

    let runtime_err = match error {
        sea_orm::DbErr::Query(RuntimeErr::SqlxError(sqlx_err))
        | sea_orm::DbErr::Exec(RuntimeErr::SqlxError(sqlx_err)) => sqlx_err,
        _ => return false,
    };

    let Some(db_error) = runtime_err.as_database_error() else {
        return false;
    };

    db_error.code().is_some_and(|code| {
        let code: &str = &code;
        SQLITE_BUSY_CODES.contains(&code)
    })
}

impl From<sea_orm::DbErr> for StorageError {
    fn from(error: sea_orm::DbErr) -> Self {
        if is_busy_or_locked(&error) {
            return StorageError::Unavailable(error.to_string());
        }

        match &error {
            sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_) => {
                StorageError::Unavailable(error.to_string())
            }
            _ => StorageError::Operation(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/problem+json"),
        );

        if let Some(retry_after) = self.retry_after
            && let Ok(header_value) = HeaderValue::from_str(&retry_after.to_string())
        {
            headers.insert("retry-after", header_value);
        }

        (self.status, headers, axum::Json(self)).into_response()
    }
}

// Error mappers for common sources

impl From<ErrorType> for ApiError {
    fn from(error_type: ErrorType) -> Self {
        Self::new(
            error_type.status_code(),
            error_type.error_code(),
            &error_type.to_string(),
        )
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        tracing::error!("Internal error: {:?}", error);
        ErrorType::InternalServerError.into()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Parser output stays in the log; it names internal types.
        tracing::debug!(rejection = %rejection.body_text(), "Rejected request body");

        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ErrorType::PayloadTooLarge.into();
        }

        match rejection {
            JsonRejection::MissingJsonContentType(_) => Self::new(
                StatusCode::BAD_REQUEST,
                VALIDATION_FAILED,
                "Missing 'Content-Type: application/json' header",
            ),
            _ => ErrorType::BadRequest.into(),
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_default();
        validation_error("Validation failed", details)
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        // The cause stays in the server log; clients only learn that the write failed.
        tracing::error!(error = %error, "Inquiry storage failure");

        if error.is_unavailable() {
            return Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                STORAGE_ERROR,
                "Unable to save inquiry",
            )
            .with_retry_after(STORAGE_RETRY_AFTER_SECS);
        }

        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            STORAGE_ERROR,
            "Unable to save inquiry",
        )
    }
}

/// Create a validation error with field details
pub fn validation_error(message: &str, field_errors: serde_json::Value) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, VALIDATION_FAILED, message).with_details(field_errors)
}
