//! Sparse partial-update builder.
//!
//! Every update endpoint of the back office receives a JSON body carrying
//! some subset of a record's columns. This module turns such a body into a
//! minimal, parameterized `UPDATE` in three steps:
//!
//! 1. [`UpdateSchema`] declares the updatable columns, their kinds and their
//!    null / empty-string policy.
//! 2. [`validate`] filters and coerces a [`SparseInput`] against the schema,
//!    producing an [`UpdatePlan`] or every [`FieldError`] at once.
//! 3. [`emit`] renders the plan as `UPDATE <table> SET a=$1,b=$2 WHERE "ID"=$3`
//!    plus the positional values.
//!
//! Nothing here touches the database; execution lives in `eventdesk-db`.

pub mod emit;
pub mod input;
pub mod rejection;
pub mod schema;
pub mod validate;
pub mod value;

pub use emit::{emit, quote_ident, Statement};
pub use input::{FieldInput, SparseInput};
pub use rejection::{FieldError, FieldErrorReason, UpdateRejection};
pub use schema::{FieldKind, FieldSpec, SchemaError, TimeFormat, UnknownFieldPolicy, UpdateSchema};
pub use validate::{parse_identifier, validate, Assignment, UpdatePlan};
pub use value::SqlValue;
