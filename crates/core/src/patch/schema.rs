//! Declarative description of the columns an update may touch.

use std::collections::HashSet;
use std::fmt;

/// Lexical shape accepted for a time-of-day field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// `HH:mm`
    HourMinute,
    /// `HH:mm:ss`
    HourMinuteSecond,
    /// `HH:mm` or `HH:mm:ss`
    Either,
}

impl TimeFormat {
    pub fn pattern(self) -> &'static str {
        match self {
            TimeFormat::HourMinute => "HH:mm",
            TimeFormat::HourMinuteSecond => "HH:mm:ss",
            TimeFormat::Either => "HH:mm[:ss]",
        }
    }
}

/// Scalar kind a field value is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Float,
    String,
    Bool,
    /// ISO-8601 calendar date, `YYYY-MM-DD`.
    Date,
    Time(TimeFormat),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Int => f.write_str("integer"),
            FieldKind::Float => f.write_str("number"),
            FieldKind::String => f.write_str("string"),
            FieldKind::Bool => f.write_str("boolean"),
            FieldKind::Date => f.write_str("date (YYYY-MM-DD)"),
            FieldKind::Time(format) => write!(f, "time ({})", format.pattern()),
        }
    }
}

/// One updatable column.
///
/// `name` is the key expected in the request body, `column` the database
/// column it is written to. Both default to the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub column: String,
    pub kind: FieldKind,
    /// NOT NULL column: may be omitted from an update, never cleared.
    pub required: bool,
    pub nullable: bool,
    /// Treat `""` as "not supplied" instead of "set to empty".
    pub empty_string_means_absent: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            column: name.clone(),
            name,
            kind,
            required: false,
            nullable: false,
            empty_string_means_absent: false,
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn empty_as_absent(mut self) -> Self {
        self.empty_string_means_absent = true;
        self
    }
}

/// What to do with body keys the schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFieldPolicy {
    /// Report each one as [`FieldErrorReason::UnknownField`](super::FieldErrorReason::UnknownField).
    #[default]
    Reject,
    /// Ignore them.
    Drop,
}

/// Mistakes in a schema definition, caught when the schema is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("identifier column must not be empty")]
    EmptyIdColumn,

    #[error("field name and column must not be empty")]
    EmptyName,

    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("column '{0}' is written by more than one field")]
    DuplicateColumn(String),

    #[error("field '{0}' targets the identifier column")]
    IdentifierNotUpdatable(String),

    #[error("field '{0}' cannot be both required and nullable")]
    RequiredNullable(String),
}

/// Ordered set of [`FieldSpec`]s plus the identifier column.
///
/// Field order is the order of the emitted `SET` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSchema {
    id_column: String,
    fields: Vec<FieldSpec>,
    unknown_fields: UnknownFieldPolicy,
}

impl UpdateSchema {
    pub fn new(id_column: impl Into<String>, fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        let id_column = id_column.into();
        if id_column.is_empty() {
            return Err(SchemaError::EmptyIdColumn);
        }

        let mut names = HashSet::new();
        let mut columns = HashSet::new();
        for field in &fields {
            if field.name.is_empty() || field.column.is_empty() {
                return Err(SchemaError::EmptyName);
            }
            if field.name == id_column || field.column == id_column {
                return Err(SchemaError::IdentifierNotUpdatable(field.name.clone()));
            }
            if field.required && field.nullable {
                return Err(SchemaError::RequiredNullable(field.name.clone()));
            }
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            if !columns.insert(field.column.as_str()) {
                return Err(SchemaError::DuplicateColumn(field.column.clone()));
            }
        }

        Ok(Self {
            id_column,
            fields,
            unknown_fields: UnknownFieldPolicy::default(),
        })
    }

    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn unknown_fields(&self) -> UnknownFieldPolicy {
        self.unknown_fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether `key` may legitimately appear in a request body.
    pub fn accepts_key(&self, key: &str) -> bool {
        key == self.id_column || self.field(key).is_some()
    }
}
