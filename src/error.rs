//! Application error type and its HTTP representation.
//!
//! Every fallible operation in the domain, application and API layers returns
//! [`AppError`]. Handlers return it directly; the [`IntoResponse`] impl turns it
//! into a JSON body of the form:
//!
//! ```json
//! { "error": "Shortened URL not found", "code": "not_found", "details": { "code": "abc" } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Serialized error body returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input (400).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Custom code already taken at creation time (400).
    #[error("{message}")]
    Duplicate { message: String, details: Value },

    /// Unknown code (404).
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Code already taken on rename, or a unique constraint hit (409).
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Store failures and anything else the caller can't fix (500).
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate(message: impl Into<String>, details: Value) -> Self {
        Self::Duplicate {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code included in the response body.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::Duplicate { .. } => "duplicate_code",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn into_body(self) -> ErrorBody {
        let code = self.error_code();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::Duplicate { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Internal { message, details } => (message, details),
        };

        ErrorBody {
            error: message,
            code,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.into_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", json!(errors))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

/// Maps a database error onto the API taxonomy.
///
/// Unique violations become [`AppError::Conflict`] carrying the constraint name;
/// everything else is logged and reported as a generic internal error.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": db.constraint() }),
        );
    }

    tracing::error!(error = %e, "Database error");
    AppError::internal("Database error", json!({}))
}
