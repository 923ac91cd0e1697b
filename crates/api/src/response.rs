//! Shared response envelope types for API handlers.
//!
//! Every response, success or failure, carries a `success` flag:
//!
//! ```text
//! { "success": true,  "data": ... }
//! { "success": false, "code": "VALIDATION_ERROR", "errors": [ { "field", "reason", "message" } ] }
//! ```

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure envelope produced by [`AppError`](crate::error::AppError).
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: &'static str,
    pub errors: Vec<ErrorDetail>,
}

/// One problem in a failure envelope. `field` is `null` for request-level errors.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub field: Option<String>,
    pub reason: &'static str,
    pub message: String,
}

impl ErrorDetail {
    pub fn general(reason: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: None,
            reason,
            message: message.into(),
        }
    }
}
