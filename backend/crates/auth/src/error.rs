//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. The API contract
//! uses stable message identifiers in response bodies, so every variant
//! maps to one of the identifiers in `kernel::messages`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::messages;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed request fields
    #[error("Invalid request parameters")]
    InvalidParameters,

    /// Unknown email or wrong password
    ///
    /// One variant for both so responses never reveal whether an
    /// email is registered.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email already registered
    #[error("Email already registered")]
    AlreadyExists,

    /// Uploaded file has a content type outside the image allow-list
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Token signing failure
    #[error("Token error: {0}")]
    Token(#[from] platform::token::TokenError),

    /// Image storage failure
    #[error("Blob storage error: {0}")]
    Blob(#[from] platform::blob::BlobError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // The API reports credential and conflict failures as plain
            // client errors, matching the published contract
            AuthError::InvalidParameters
            | AuthError::InvalidCredentials
            | AuthError::AlreadyExists
            | AuthError::UnsupportedFileType(_) => StatusCode::BAD_REQUEST,
            AuthError::Token(_)
            | AuthError::Blob(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidParameters
            | AuthError::InvalidCredentials
            | AuthError::AlreadyExists
            | AuthError::UnsupportedFileType(_) => ErrorKind::BadRequest,
            AuthError::Token(_)
            | AuthError::Blob(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable message identifier carried in the response body
    pub fn message_id(&self) -> &'static str {
        match self {
            AuthError::InvalidParameters => messages::INVALID_PARAMETERS,
            AuthError::InvalidCredentials => messages::INVALID_CREDENTIALS,
            AuthError::AlreadyExists => messages::ALREADY_EXISTS,
            AuthError::UnsupportedFileType(_) => messages::UNSUPPORTED_FILE_TYPE,
            AuthError::Token(_)
            | AuthError::Blob(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => messages::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.message_id())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Blob(e) => {
                tracing::error!(error = %e, "Auth blob storage error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Auth token error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
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

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<platform::upload::UploadError> for AuthError {
    fn from(err: platform::upload::UploadError) -> Self {
        match err {
            platform::upload::UploadError::UnsupportedFileType(ct) => {
                AuthError::UnsupportedFileType(ct)
            }
        }
    }
}
