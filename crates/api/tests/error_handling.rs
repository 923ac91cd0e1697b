//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code and envelope. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use std::borrow::Cow;

use axum::response::IntoResponse;
use eventdesk_api::error::AppError;
use eventdesk_core::error::CoreError;
use eventdesk_core::patch::{FieldError, FieldErrorReason, FieldKind, TimeFormat, UpdateRejection};
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Car",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["errors"][0]["message"], "Car with id 42 not found");
    assert!(json["errors"][0]["field"].is_null());
}

// ---------------------------------------------------------------------------
// Test: field rejections map to 400 with one entry per field
// ---------------------------------------------------------------------------

#[tokio::test]
async fn field_rejection_returns_400_with_every_field() {
    let err = AppError::Core(CoreError::Rejected(UpdateRejection::Fields(vec![
        FieldError::new(
            "nbr_invite",
            FieldErrorReason::TypeMismatch {
                expected: FieldKind::Int,
            },
        ),
        FieldError::new(
            "start_time",
            FieldErrorReason::BadFormat {
                expected: FieldKind::Time(TimeFormat::HourMinute),
            },
        ),
    ])));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "nbr_invite");
    assert_eq!(errors[0]["reason"], "type_mismatch");
    assert_eq!(errors[1]["field"], "start_time");
    assert_eq!(errors[1]["reason"], "bad_format");
    assert_eq!(errors[1]["message"], "start_time must be a valid time (HH:mm)");
}

// ---------------------------------------------------------------------------
// Test: top-level rejections carry a null field
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_fields_rejection_returns_400() {
    let err = AppError::Core(CoreError::Rejected(UpdateRejection::NoFieldsToUpdate));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "NO_FIELDS_TO_UPDATE");
    assert_eq!(json["errors"][0]["reason"], "no_fields_to_update");
    assert!(json["errors"][0]["field"].is_null());
}

#[tokio::test]
async fn missing_identifier_rejection_returns_400() {
    let err = AppError::Core(CoreError::from(UpdateRejection::MissingIdentifier));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MISSING_IDENTIFIER");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("body must be a JSON object".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["errors"][0]["message"], "body must be a JSON object");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Unauthorized maps to 401
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Missing Authorization header".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: sqlx RowNotFound maps to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Database errors by SQLSTATE
// ---------------------------------------------------------------------------

/// A driver error carrying a chosen SQLSTATE.
#[derive(Debug)]
struct StateError {
    code: &'static str,
    message: &'static str,
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for StateError {}

impl sqlx::error::DatabaseError for StateError {
    fn message(&self) -> &str {
        self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.code))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> sqlx::error::ErrorKind {
        sqlx::error::ErrorKind::Other
    }
}

fn database_error(code: &'static str, message: &'static str) -> AppError {
    AppError::Database(sqlx::Error::Database(Box::new(StateError { code, message })))
}

#[tokio::test]
async fn numeric_out_of_range_returns_400() {
    let (status, json) = error_to_response(database_error("22003", "integer out of range")).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALUE_OUT_OF_RANGE");
    assert_eq!(json["errors"][0]["reason"], "value_out_of_range");
}

#[tokio::test]
async fn unexpected_database_error_returns_500_and_sanitizes_message() {
    let err = database_error("XX000", "secret database credentials leaked");

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["errors"][0]["message"], "An internal error occurred");
}

#[tokio::test]
async fn pool_timeout_returns_500() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}
