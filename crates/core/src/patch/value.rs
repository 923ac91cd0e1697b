use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};

use super::schema::FieldKind;

/// A coerced value ready to be bound to a positional parameter.
///
/// `Null` keeps the field kind so the driver can bind a typed NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null(FieldKind),
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl Serialize for SqlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SqlValue::Null(_) => serializer.serialize_unit(),
            SqlValue::Int(v) => serializer.serialize_i64(*v),
            SqlValue::Float(v) => serializer.serialize_f64(*v),
            SqlValue::Text(v) => serializer.serialize_str(v),
            SqlValue::Bool(v) => serializer.serialize_bool(*v),
            SqlValue::Date(v) => serializer.collect_str(&v.format("%Y-%m-%d")),
            SqlValue::Time(v) => serializer.collect_str(&v.format("%H:%M:%S")),
        }
    }
}
