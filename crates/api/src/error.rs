use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use eventdesk_core::error::CoreError;
use eventdesk_core::patch::UpdateRejection;

use crate::response::{ErrorDetail, ErrorResponse};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{ "success": false, ... }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `eventdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A route-level miss, e.g. an unknown resource slug.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, errors) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    vec![ErrorDetail::general(
                        "not_found",
                        format!("{entity} with id {id} not found"),
                    )],
                ),
                CoreError::Rejected(rejection) => classify_rejection(rejection),
                CoreError::Unauthorized(msg) => (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    vec![ErrorDetail::general("unauthorized", msg.clone())],
                ),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                vec![ErrorDetail::general("bad_request", msg.clone())],
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                vec![ErrorDetail::general("not_found", msg.clone())],
            ),
        };

        let body = ErrorResponse {
            success: false,
            code,
            errors,
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Map an update rejection to a 400 listing every problem.
fn classify_rejection(rejection: &UpdateRejection) -> (StatusCode, &'static str, Vec<ErrorDetail>) {
    match rejection {
        UpdateRejection::MissingIdentifier => (
            StatusCode::BAD_REQUEST,
            "MISSING_IDENTIFIER",
            vec![ErrorDetail::general(rejection.code(), rejection.to_string())],
        ),
        UpdateRejection::NoFieldsToUpdate => (
            StatusCode::BAD_REQUEST,
            "NO_FIELDS_TO_UPDATE",
            vec![ErrorDetail::general(rejection.code(), rejection.to_string())],
        ),
        UpdateRejection::Fields(errors) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            errors
                .iter()
                .map(|e| ErrorDetail {
                    field: Some(e.field.clone()),
                    reason: e.reason.code(),
                    message: e.to_string(),
                })
                .collect(),
        ),
    }
}

fn internal() -> (StatusCode, &'static str, Vec<ErrorDetail>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        vec![ErrorDetail::general(
            "internal_error",
            "An internal error occurred",
        )],
    )
}

/// Classify a sqlx error into an HTTP status, error code, and details.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (SQLSTATE 23505) map to 409.
/// - Check constraint violations (SQLSTATE 23514) map to 400.
/// - Out-of-range values (SQLSTATE 22003, 22001) map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, Vec<ErrorDetail>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            vec![ErrorDetail::general("not_found", "Resource not found")],
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    vec![ErrorDetail::general(
                        "conflict",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    )],
                ),
                Some("23514") => (
                    StatusCode::BAD_REQUEST,
                    "CONSTRAINT_VIOLATION",
                    vec![ErrorDetail::general(
                        "constraint_violation",
                        format!("Value violates check constraint: {constraint}"),
                    )],
                ),
                // numeric_value_out_of_range, string_data_right_truncation
                Some("22003" | "22001") => (
                    StatusCode::BAD_REQUEST,
                    "VALUE_OUT_OF_RANGE",
                    vec![ErrorDetail::general(
                        "value_out_of_range",
                        "Value does not fit the target column",
                    )],
                ),
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    internal()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
