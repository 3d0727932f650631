use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `INVALID_ARGUMENT`,
    /// `VALIDATION_ERROR`, `NOT_FOUND`, `CONFLICT`, `UNAVAILABLE`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Validation failed")]
    pub message: String,
    /// One message per violated field rule.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Malformed identifier, rejected before any storage access.
    InvalidArgument(String),
    /// One or more field rules were violated.
    Validation(Vec<String>),
    NotFound(String),
    Conflict(String),
    /// The storage backend failed or could not be reached.
    Unavailable(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(vec![msg.into()])
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::InvalidArgument(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "INVALID_ARGUMENT",
                    message: msg,
                    errors: Vec::new(),
                },
            ),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: "Validation failed".into(),
                    errors,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                    errors: Vec::new(),
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                    errors: Vec::new(),
                },
            ),
            AppError::Unavailable(detail) => {
                tracing::error!("Storage unavailable: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorBody {
                        code: "UNAVAILABLE",
                        message: "Storage is temporarily unavailable".into(),
                        errors: Vec::new(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate(key) => {
                tracing::warn!("Unique key rejected by storage: {key}");
                AppError::Conflict(format!("A record with key '{key}' already exists"))
            }
            other => AppError::Unavailable(other.to_string()),
        }
    }
}
