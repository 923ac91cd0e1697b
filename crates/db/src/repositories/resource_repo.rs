//! Ownership checks and update execution for catalog resources.

use chrono::{NaiveDate, NaiveTime};
use eventdesk_core::patch::{quote_ident, FieldKind, SqlValue, Statement};
use eventdesk_core::resources::{OwnerScope, Resource};
use eventdesk_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{PgConnection, PgPool, Postgres};

/// Runs the shared update pattern against any [`Resource`].
pub struct ResourceRepo;

impl ResourceRepo {
    /// Lock the row `id` if it belongs to `owner_id`.
    ///
    /// Returns `false` when the row does not exist or another enterprise
    /// owns it. The lock lasts until the surrounding transaction ends.
    pub async fn lock_owned(
        conn: &mut PgConnection,
        resource: &Resource,
        id: DbId,
        owner_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = ownership_query(resource);
        let row = sqlx::query(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(conn)
            .await?;
        Ok(row.is_some())
    }

    /// Execute an emitted update statement. Returns the affected row count.
    pub async fn execute(conn: &mut PgConnection, statement: &Statement) -> Result<u64, sqlx::Error> {
        let mut query = sqlx::query(&statement.sql);
        for value in &statement.values {
            query = bind_value(query, value);
        }
        let result = query.execute(conn).await?;
        Ok(result.rows_affected())
    }

    /// Apply `statement` to the row `id` of `resource` in one transaction,
    /// after re-validating that `owner_id` owns it.
    ///
    /// Returns `false` (and writes nothing) when the row is not owned.
    pub async fn update_owned(
        pool: &PgPool,
        resource: &Resource,
        id: DbId,
        owner_id: DbId,
        statement: &Statement,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock_owned(&mut tx, resource, id, owner_id).await? {
            tracing::debug!(resource = resource.slug, id, owner_id, "Row not owned by caller");
            return Ok(false);
        }

        let affected = Self::execute(&mut tx, statement).await?;
        tx.commit().await?;

        tracing::debug!(resource = resource.slug, id, affected, "Update executed");
        Ok(affected > 0)
    }
}

fn ownership_query(resource: &Resource) -> String {
    let table = quote_ident(resource.table);
    let id = quote_ident(resource.schema.id_column());

    match resource.owner {
        OwnerScope::Column(owner_column) => format!(
            "SELECT 1 FROM {table} WHERE {id} = $1 AND {} = $2 FOR UPDATE",
            quote_ident(owner_column)
        ),
        OwnerScope::Parent {
            foreign_key,
            table: parent,
            owner_column,
        } => format!(
            "SELECT 1 FROM {table} t \
             JOIN {} p ON p.{id} = t.{} \
             WHERE t.{id} = $1 AND p.{} = $2 \
             FOR UPDATE OF t",
            quote_ident(parent),
            quote_ident(foreign_key),
            quote_ident(owner_column)
        ),
    }
}

/// Bind one value; NULLs are typed after the field kind so PostgreSQL
/// never has to infer them.
fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &'q SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        SqlValue::Null(kind) => match kind {
            FieldKind::Int => query.bind(None::<i64>),
            FieldKind::Float => query.bind(None::<f64>),
            FieldKind::String => query.bind(None::<String>),
            FieldKind::Bool => query.bind(None::<bool>),
            FieldKind::Date => query.bind(None::<NaiveDate>),
            FieldKind::Time(_) => query.bind(None::<NaiveTime>),
        },
        SqlValue::Int(v) => query.bind(*v),
        SqlValue::Float(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.as_str()),
        SqlValue::Bool(v) => query.bind(*v),
        SqlValue::Date(v) => query.bind(*v),
        SqlValue::Time(v) => query.bind(*v),
    }
}
