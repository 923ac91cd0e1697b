//! Sparse body -> [`UpdatePlan`]. Pure logic.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime, Timelike};
use regex::Regex;
use serde_json::Value;

use super::input::{FieldInput, SparseInput};
use super::rejection::{FieldError, FieldErrorReason, UpdateRejection};
use super::schema::{FieldKind, TimeFormat, UnknownFieldPolicy, UpdateSchema};
use super::value::SqlValue;
use crate::types::DbId;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
static HOUR_MINUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid regex"));
static HOUR_MINUTE_SECOND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}$").expect("valid regex"));

/// One `column = value` pair of an update.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub kind: FieldKind,
    pub value: SqlValue,
}

/// A validated update: never empty, columns in schema order.
///
/// Only [`validate`] builds one.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    id: DbId,
    assignments: Vec<Assignment>,
}

impl UpdatePlan {
    pub fn id(&self) -> DbId {
        self.id
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn columns(&self) -> Vec<&str> {
        self.assignments.iter().map(|a| a.column.as_str()).collect()
    }
}

/// Parse an identifier taken from a trusted source such as a route segment.
pub fn parse_identifier(raw: &str) -> Result<DbId, UpdateRejection> {
    match raw.parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(UpdateRejection::MissingIdentifier),
    }
}

/// Validate `input` against `schema` for the record `identifier`.
///
/// The identifier never comes from `input`; a body key equal to the
/// schema's identifier column is ignored. Every field problem is collected
/// before returning.
pub fn validate(
    schema: &UpdateSchema,
    input: &SparseInput,
    identifier: Option<DbId>,
) -> Result<UpdatePlan, UpdateRejection> {
    let id = match identifier {
        Some(id) if id > 0 => id,
        _ => return Err(UpdateRejection::MissingIdentifier),
    };

    let mut assignments = Vec::new();
    let mut errors = Vec::new();

    for spec in schema.fields() {
        let coerced = match input.get(&spec.name) {
            FieldInput::Absent => continue,
            FieldInput::EmptyString if spec.empty_string_means_absent => continue,
            FieldInput::Null if spec.nullable => Ok(SqlValue::Null(spec.kind)),
            FieldInput::Null => Err(FieldErrorReason::NullNotAllowed),
            FieldInput::EmptyString => coerce(spec.kind, &Value::String(String::new())),
            FieldInput::Value(value) => coerce(spec.kind, value),
        };

        match coerced {
            Ok(value) => assignments.push(Assignment {
                column: spec.column.clone(),
                kind: spec.kind,
                value,
            }),
            Err(reason) => errors.push(FieldError::new(spec.name.clone(), reason)),
        }
    }

    if schema.unknown_fields() == UnknownFieldPolicy::Reject {
        let mut unknown: Vec<&str> = input.keys().filter(|k| !schema.accepts_key(k)).collect();
        unknown.sort_unstable();
        errors.extend(
            unknown
                .into_iter()
                .map(|key| FieldError::new(key, FieldErrorReason::UnknownField)),
        );
    }

    if !errors.is_empty() {
        return Err(UpdateRejection::Fields(errors));
    }
    if assignments.is_empty() {
        return Err(UpdateRejection::NoFieldsToUpdate);
    }

    Ok(UpdatePlan { id, assignments })
}

fn coerce(kind: FieldKind, value: &Value) -> Result<SqlValue, FieldErrorReason> {
    let mismatch = FieldErrorReason::TypeMismatch { expected: kind };
    let bad_format = FieldErrorReason::BadFormat { expected: kind };

    match kind {
        FieldKind::Int => match value {
            Value::Number(n) => n.as_i64().map(SqlValue::Int).ok_or(mismatch),
            Value::String(s) => s.parse::<i64>().map(SqlValue::Int).map_err(|_| mismatch),
            _ => Err(mismatch),
        },
        FieldKind::Float => {
            let parsed = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.parse::<f64>().ok(),
                _ => None,
            };
            match parsed {
                Some(f) if f.is_finite() => Ok(SqlValue::Float(f)),
                _ => Err(mismatch),
            }
        }
        FieldKind::String => match value {
            Value::String(s) => Ok(SqlValue::Text(s.clone())),
            _ => Err(mismatch),
        },
        FieldKind::Bool => match value {
            Value::Bool(b) => Ok(SqlValue::Bool(*b)),
            Value::String(s) if s == "true" => Ok(SqlValue::Bool(true)),
            Value::String(s) if s == "false" => Ok(SqlValue::Bool(false)),
            _ => Err(mismatch),
        },
        FieldKind::Date => {
            let Value::String(s) = value else {
                return Err(mismatch);
            };
            if !DATE_RE.is_match(s) {
                return Err(bad_format);
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(SqlValue::Date)
                .map_err(|_| bad_format)
        }
        FieldKind::Time(format) => {
            let Value::String(s) = value else {
                return Err(mismatch);
            };
            parse_time(s, format)
                .map(SqlValue::Time)
                .ok_or(bad_format)
        }
    }
}

fn parse_time(s: &str, format: TimeFormat) -> Option<NaiveTime> {
    let short = || {
        HOUR_MINUTE_RE
            .is_match(s)
            .then(|| NaiveTime::parse_from_str(s, "%H:%M").ok())
            .flatten()
    };
    let long = || {
        HOUR_MINUTE_SECOND_RE
            .is_match(s)
            .then(|| NaiveTime::parse_from_str(s, "%H:%M:%S").ok())
            .flatten()
    };

    let parsed = match format {
        TimeFormat::HourMinute => short(),
        TimeFormat::HourMinuteSecond => long(),
        TimeFormat::Either => short().or_else(long),
    };
    // chrono reads `:60` as a leap second
    parsed.filter(|t| t.nanosecond() < 1_000_000_000)
}
