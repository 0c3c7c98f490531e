//! Resource Error Types
//!
//! Resource-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::ResourceId;
use thiserror::Error;

/// Resource-specific result type alias
pub type ResourceResult<T> = Result<T, ResourceError>;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Resource {0} not found")]
    NotFound(ResourceId),

    /// Request field missing or out of range
    #[error("Invalid resource: {0}")]
    Validation(String),

    #[error("File exceeds the {limit} byte upload limit")]
    PayloadTooLarge { limit: usize },

    /// Missing session or insufficient role
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResourceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ResourceError::Auth(e) => e.status_code(),
            _ => StatusCode::from_u16(self.kind().status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ResourceError::NotFound(_) => ErrorKind::NotFound,
            ResourceError::Validation(_) => ErrorKind::BadRequest,
            ResourceError::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
            ResourceError::Auth(e) => e.kind(),
            ResourceError::Database(_) | ResourceError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    fn log(&self) {
        match self {
            ResourceError::Database(e) => {
                tracing::error!(error = %e, "Resource database error");
            }
            ResourceError::Internal(msg) => {
                tracing::error!(message = %msg, "Resource internal error");
            }
            ResourceError::Auth(_) => {}
            _ => {
                tracing::debug!(error = %self, "Resource error");
            }
        }
    }
}

impl From<ResourceError> for AppError {
    fn from(err: ResourceError) -> Self {
        err.log();
        let kind = err.kind();
        let message = err.to_string();
        match err {
            // Both carry their own status mapping
            ResourceError::Auth(e) => e.into(),
            ResourceError::Database(e) => e.into(),
            ResourceError::PayloadTooLarge { .. } => {
                AppError::new(kind, message).with_action("Upload a smaller file")
            }
            _ => AppError::new(kind, message),
        }
    }
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
