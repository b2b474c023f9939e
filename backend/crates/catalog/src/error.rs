//! Catalog Error Types
//!
//! Catalog-specific error variants integrating with the unified
//! `kernel::error::AppError` system and its stable message identifiers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::messages;
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing or malformed request fields, including malformed book
    /// identifiers and no-op favourite removals
    #[error("Invalid request parameters")]
    InvalidParameters,

    /// Book (or account behind a stale token) does not exist
    #[error("Resource not found")]
    NotFound,

    /// Favourite membership already present
    #[error("Already a favourite")]
    AlreadyExists,

    /// Uploaded file has a content type outside the image allow-list
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

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

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::InvalidParameters
            | CatalogError::AlreadyExists
            | CatalogError::UnsupportedFileType(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound => StatusCode::NOT_FOUND,
            CatalogError::Blob(_) | CatalogError::Database(_) | CatalogError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::InvalidParameters
            | CatalogError::AlreadyExists
            | CatalogError::UnsupportedFileType(_) => ErrorKind::BadRequest,
            CatalogError::NotFound => ErrorKind::NotFound,
            CatalogError::Blob(_) | CatalogError::Database(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Stable message identifier carried in the response body
    pub fn message_id(&self) -> &'static str {
        match self {
            CatalogError::InvalidParameters => messages::INVALID_PARAMETERS,
            CatalogError::NotFound => messages::NOT_FOUND,
            CatalogError::AlreadyExists => messages::ALREADY_EXISTS,
            CatalogError::UnsupportedFileType(_) => messages::UNSUPPORTED_FILE_TYPE,
            CatalogError::Blob(_) | CatalogError::Database(_) | CatalogError::Internal(_) => {
                messages::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.message_id())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Blob(e) => {
                tracing::error!(error = %e, "Catalog blob storage error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for CatalogError {
    fn from(err: AppError) -> Self {
        CatalogError::Internal(err.to_string())
    }
}

impl From<platform::upload::UploadError> for CatalogError {
    fn from(err: platform::upload::UploadError) -> Self {
        match err {
            platform::upload::UploadError::UnsupportedFileType(ct) => {
                CatalogError::UnsupportedFileType(ct)
            }
        }
    }
}
