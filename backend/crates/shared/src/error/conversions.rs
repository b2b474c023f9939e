//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;
use super::kind::ErrorKind;
use crate::messages;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Forbidden,
            _ => ErrorKind::InternalServerError,
        };
        AppError::new(kind, messages::INTERNAL_SERVER_ERROR).with_source(err)
    }
}

impl From<std::string::FromUtf8Error> for AppError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        AppError::bad_request(messages::INVALID_PARAMETERS).with_source(err)
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::bad_request(messages::INVALID_PARAMETERS).with_source(err)
    }
}

impl From<std::num::ParseFloatError> for AppError {
    fn from(err: std::num::ParseFloatError) -> Self {
        AppError::bad_request(messages::INVALID_PARAMETERS).with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::bad_request(messages::INVALID_PARAMETERS).with_source(err)
        } else {
            AppError::internal(messages::INTERNAL_SERVER_ERROR).with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => {
                AppError::not_found(messages::NOT_FOUND).with_source(err)
            }
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable(messages::INTERNAL_SERVER_ERROR).with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // PostgreSQL specific error codes
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        // Class 23: Integrity Constraint Violation.
                        // 23505 is the store-boundary backstop for the
                        // non-atomic email uniqueness check.
                        "23505" => AppError::conflict(messages::ALREADY_EXISTS),
                        "23503" => AppError::conflict(messages::NOT_FOUND),
                        "23502" | "23514" => AppError::bad_request(messages::INVALID_PARAMETERS),
                        // Class 53: Insufficient Resources
                        "53000" | "53100" | "53200" | "53300" => {
                            AppError::service_unavailable(messages::INTERNAL_SERVER_ERROR)
                        }
                        // Class 57: Operator Intervention
                        "57000" | "57014" | "57P01" | "57P02" | "57P03" => {
                            AppError::service_unavailable(messages::INTERNAL_SERVER_ERROR)
                        }
                        _ => AppError::internal(messages::INTERNAL_SERVER_ERROR),
                    }
                } else {
                    AppError::internal(messages::INTERNAL_SERVER_ERROR)
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable(messages::INTERNAL_SERVER_ERROR).with_source(err)
            }
            _ => AppError::internal(messages::INTERNAL_SERVER_ERROR).with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs; `detail` carries the
        // stable message identifier the clients match on.
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "message": self.message(),
        });

        (status, Json(body)).into_response()
    }
}
