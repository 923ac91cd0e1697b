//! [`UpdatePlan`] -> positional-parameter `UPDATE` statement.

use std::sync::LazyLock;

use regex::Regex;

use super::validate::UpdatePlan;
use super::value::SqlValue;

static BARE_IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("valid regex"));

/// PostgreSQL keywords that cannot appear bare as a column name: the
/// "reserved" and "reserved (can be function or type)" classes. Sorted for
/// binary search.
const RESERVED: &[&str] = &[
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric",
    "authorization", "binary", "both", "case", "cast", "check", "collate", "collation", "column",
    "concurrently", "constraint", "create", "cross", "current_catalog", "current_date",
    "current_role", "current_schema", "current_time", "current_timestamp", "current_user",
    "default", "deferrable", "desc", "distinct", "do", "else", "end", "except", "false", "fetch",
    "for", "foreign", "freeze", "from", "full", "grant", "group", "having", "ilike", "in",
    "initially", "inner", "intersect", "into", "is", "isnull", "join", "lateral", "leading",
    "left", "like", "limit", "localtime", "localtimestamp", "natural", "not", "notnull", "null",
    "offset", "on", "only", "or", "order", "outer", "overlaps", "placing", "primary",
    "references", "returning", "right", "select", "session_user", "similar", "some",
    "symmetric", "system_user", "table", "tablesample", "then", "to", "trailing", "true",
    "union", "unique", "user", "using", "variadic", "verbose", "when", "where", "window",
    "with",
];

fn is_reserved(name: &str) -> bool {
    RESERVED.binary_search(&name).is_ok()
}

/// A rendered update, ready for any positional-parameter driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    /// `col1=$1,col2=$2,...`
    pub set_clause: String,
    /// Bound in order; the identifier is always last.
    pub values: Vec<SqlValue>,
}

impl Statement {
    pub fn parameter_count(&self) -> usize {
        self.values.len()
    }
}

/// Quote `name` unless it is a plain lowercase, non-reserved identifier.
pub fn quote_ident(name: &str) -> String {
    if BARE_IDENT_RE.is_match(name) && !is_reserved(name) {
        name.to_string()
    } else {
        always_quote(name)
    }
}

fn always_quote(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_table(table: &str) -> String {
    table.split('.').map(quote_ident).collect::<Vec<_>>().join(".")
}

/// Render `plan` as `UPDATE <table> SET ... WHERE "<id_column>"=$N+1`.
///
/// Column names come from the plan, which only ever carries schema columns.
pub fn emit(plan: &UpdatePlan, table: &str, id_column: &str) -> Statement {
    let assignments = plan.assignments();
    debug_assert!(!assignments.is_empty(), "an update plan is never empty");

    let set_clause = assignments
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}=${}", quote_ident(&a.column), i + 1))
        .collect::<Vec<_>>()
        .join(",");

    let id_param = assignments.len() + 1;
    let sql = format!(
        "UPDATE {} SET {set_clause} WHERE {}=${id_param}",
        quote_table(table),
        always_quote(id_column),
    );

    let mut values: Vec<SqlValue> = assignments.iter().map(|a| a.value.clone()).collect();
    values.push(SqlValue::Int(plan.id()));

    Statement {
        sql,
        set_clause,
        values,
    }
}
