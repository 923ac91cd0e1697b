//! Why an update was refused.
//!
//! Rejections are ordinary values: the caller turns them into a client
//! error listing every problem in one response.

use std::fmt;

use super::schema::FieldKind;

/// Problem with a single body field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorReason {
    /// Value present but not coercible to the declared kind.
    TypeMismatch { expected: FieldKind },
    /// Right kind, wrong lexical shape (e.g. `25:00` for a time).
    BadFormat { expected: FieldKind },
    NullNotAllowed,
    /// Key not declared by the schema.
    UnknownField,
}

impl FieldErrorReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            FieldErrorReason::TypeMismatch { .. } => "type_mismatch",
            FieldErrorReason::BadFormat { .. } => "bad_format",
            FieldErrorReason::NullNotAllowed => "null_not_allowed",
            FieldErrorReason::UnknownField => "unknown_field",
        }
    }
}

impl fmt::Display for FieldErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorReason::TypeMismatch { expected } => write!(f, "expected {expected}"),
            FieldErrorReason::BadFormat { expected } => write!(f, "must be a valid {expected}"),
            FieldErrorReason::NullNotAllowed => f.write_str("cannot be null"),
            FieldErrorReason::UnknownField => f.write_str("is not an updatable field"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} {reason}")]
pub struct FieldError {
    pub field: String,
    pub reason: FieldErrorReason,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: FieldErrorReason) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateRejection {
    /// Identifier absent, non-numeric or not positive.
    #[error("a positive integer identifier is required")]
    MissingIdentifier,

    /// Nothing left to write after filtering.
    #[error("no fields to update")]
    NoFieldsToUpdate,

    /// One entry per offending field, in schema order, unknown keys last.
    #[error("{} invalid field(s)", .0.len())]
    Fields(Vec<FieldError>),
}

impl UpdateRejection {
    /// Stable machine-readable code for the top-level reason.
    pub fn code(&self) -> &'static str {
        match self {
            UpdateRejection::MissingIdentifier => "missing_identifier",
            UpdateRejection::NoFieldsToUpdate => "no_fields_to_update",
            UpdateRejection::Fields(_) => "invalid_fields",
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            UpdateRejection::Fields(errors) => errors,
            _ => &[],
        }
    }
}
