//! Shared response envelope for API handlers.
//!
//! Every response, success or failure, is wrapped in
//! `{ "success", "message", "data", "timestamp" }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use mindcard_core::types::Timestamp;
use serde::Serialize;

/// Message used when a handler has nothing more specific to say.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operation succeeded";

/// Standard response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub timestamp: Timestamp,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            timestamp: Utc::now(),
        }
    }

    /// A failure envelope carrying structured detail (e.g. field errors).
    pub fn error_with(message: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Some(data),
            timestamp: Utc::now(),
        }
    }

    /// Wrap in a `201 Created` response.
    pub fn created(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

impl ApiResponse<()> {
    /// A success envelope with `data: null`.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            timestamp: Utc::now(),
        }
    }

    /// A failure envelope with `data: null`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
