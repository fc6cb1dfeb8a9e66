//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use mindcard_api::error::AppError;
use mindcard_core::error::{CoreError, FieldErrors};

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 naming the entity and id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Card",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Card with id 42 not found");
    assert!(json["data"].is_null());
    assert!(json["timestamp"].is_string());
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with the field map as data
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_field_map() {
    let mut fields = FieldErrors::new();
    fields.insert("title".into(), "title must not be blank".into());
    fields.insert("color".into(), "color must be at most 20 characters".into());

    let (status, json) = error_to_response(AppError::Core(CoreError::Validation(fields))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Validation failed");
    assert_eq!(json["data"]["title"], "title must not be blank");
    assert_eq!(json["data"]["color"], "color must be at most 20 characters");
}

// ---------------------------------------------------------------------------
// Test: InvalidArgument and BadRequest map to 400 with their message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_argument_returns_400_with_message() {
    let err = AppError::Core(CoreError::InvalidArgument("Unknown status 'PENDING'".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Unknown status 'PENDING'");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: internal errors map to 500 and never leak detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Internal error, please retry later");
    assert!(!json.to_string().contains("secret"));
}

#[tokio::test]
async fn core_internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::Core(CoreError::Internal("stack trace here".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Internal error, please retry later");
    assert!(!json.to_string().contains("stack trace"));
}

// ---------------------------------------------------------------------------
// Test: sqlx errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Resource not found");
}

#[tokio::test]
async fn other_database_errors_map_to_500() {
    let err = AppError::Database(sqlx::Error::PoolTimedOut);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Internal error, please retry later");
}
