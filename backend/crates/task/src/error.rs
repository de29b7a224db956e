//! Task Error Types
//!
//! This module provides task-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Task-specific result type alias
pub type TaskResult<T> = Result<T, TaskError>;

/// Task-specific error variants
#[derive(Debug, Error)]
pub enum TaskError {
    /// Absent, owned by someone else, or not a valid id. Callers cannot tell
    /// which.
    #[error("Task not found")]
    NotFound,

    /// The owning account was removed after the token was issued
    #[error("Account no longer exists")]
    OwnerMissing,

    /// Input failed validation
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            TaskError::NotFound => StatusCode::NOT_FOUND,
            TaskError::OwnerMissing => StatusCode::UNAUTHORIZED,
            TaskError::Validation(_) => StatusCode::BAD_REQUEST,
            TaskError::Database(_) | TaskError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TaskError::NotFound => ErrorKind::NotFound,
            TaskError::OwnerMissing => ErrorKind::Unauthorized,
            TaskError::Validation(_) => ErrorKind::BadRequest,
            TaskError::Database(_) | TaskError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            TaskError::Database(e) => AppError::from(e),
            TaskError::Internal(msg) => {
                AppError::internal("Internal server error").with_source(TaskError::Internal(msg))
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            TaskError::Database(e) => {
                tracing::error!(error = %e, "Task database error");
            }
            TaskError::Internal(msg) => {
                tracing::error!(message = %msg, "Task internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Task error");
            }
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for TaskError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => TaskError::Validation(err.message().to_string()),
            _ => TaskError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_plain_404() {
        let err = TaskError::NotFound;
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let app = err.into_app_error();
        assert_eq!(app.status_code(), 404);
        assert_eq!(app.message(), "Task not found");
    }

    #[test]
    fn test_internal_detail_hidden() {
        let app = TaskError::Internal("row 17 had status 'archived'".into()).into_app_error();
        assert_eq!(app.status_code(), 500);
        assert!(!app.message().contains("archived"));
    }

    #[test]
    fn test_validation_from_app_error() {
        let err = TaskError::from(AppError::bad_request("Title cannot be empty"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Title cannot be empty");
    }
}
