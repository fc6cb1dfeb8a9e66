use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mindcard_core::error::{CoreError, FieldErrors};

use crate::response::ApiResponse;

/// Message returned for every 500; the detail only goes to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error, please retry later";

/// Message accompanying a field-error map.
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the standard failure envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mindcard_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A malformed request (body, query string or path).
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    (StatusCode::NOT_FOUND, format!("{entity} with id {id} not found"))
                }
                CoreError::Validation(errors) => return validation_response(errors),
                CoreError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
                }
            },

            AppError::Database(err) => classify_sqlx_error(&err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
            }
        };

        (status, Json(ApiResponse::error(message))).into_response()
    }
}

fn validation_response(errors: FieldErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error_with(VALIDATION_FAILED_MESSAGE, errors)),
    )
        .into_response()
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - CHECK constraint violations (23514) map to 400 naming the constraint.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23514") => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            tracing::warn!(constraint, "Check constraint violated");
            (
                StatusCode::BAD_REQUEST,
                format!("Value violates constraint: {constraint}"),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
        }
    }
}
