//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::client::storage::StorageError;
use crate::domain::value_object::Role;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration number or password absent or blank
    #[error("Registration number and password are required")]
    MissingFields,

    /// Request body could not be parsed
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Invalid registration number or password")]
    InvalidCredentials,

    /// Session cookie missing, tampered with, or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Valid session without the required role
    #[error("Insufficient role: {0} required")]
    Forbidden(Role),

    /// Client-side cookie storage unavailable
    #[error("Cookie storage unavailable: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingFields | AuthError::MalformedBody(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::Forbidden(_) => ErrorKind::Forbidden,
            AuthError::Storage(_) => ErrorKind::ServiceUnavailable,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AuthError::MissingFields => err.with_action("Enter both your registration number and password"),
            AuthError::SessionInvalid => err.with_action("Sign in again"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid admin login attempt");
            }
            AuthError::Forbidden(role) => {
                tracing::warn!(required = %role, "Request rejected for insufficient role");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.log();
        err.to_app_error()
    }
}
