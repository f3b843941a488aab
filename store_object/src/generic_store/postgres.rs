//! PostgreSQL executor
//!
//! Binds JSON arguments onto sqlx queries with the SQL type of their column
//! and reads rows back as JSON objects.

use crate::errors::StoreError;
use crate::query_builder::{ParamType, Statement};
use crate::traits::DatabaseExecutor;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgArguments, PgTypeInfo};
use sqlx::postgres::types::Oid;
use sqlx::query::{Query, QueryScalar};
use sqlx::{Encode, PgPool, Postgres, Type};
use uuid::Uuid;

/// NULL sent without a declared type so the server infers it from the column
#[derive(Debug, Clone, Copy)]
pub(crate) struct UntypedNull;

impl Type<Postgres> for UntypedNull {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_oid(Oid(0))
    }
}

impl Encode<'_, Postgres> for UntypedNull {
    fn encode_by_ref(&self, _buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        Ok(IsNull::Yes)
    }
}

/// One argument converted for the SQL type of the column it belongs to
#[derive(Debug, Clone, PartialEq)]
enum PgArg {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Uuid(Uuid),
    Json(Value),
}

fn number_arg(n: &serde_json::Number) -> PgArg {
    if let Some(i) = n.as_i64() {
        PgArg::Int(i)
    } else if let Some(f) = n.as_f64() {
        PgArg::Float(f)
    } else {
        PgArg::Text(n.to_string())
    }
}

// Query-string values reach NUMERIC columns as strings. Anything that does
// not parse is sent as text and rejected by the server.
fn numeric_arg(s: &str) -> PgArg {
    if let Ok(i) = s.parse::<i64>() {
        PgArg::Int(i)
    } else if let Some(f) = s.parse::<f64>().ok().filter(|f| f.is_finite()) {
        PgArg::Float(f)
    } else {
        PgArg::Text(s.to_string())
    }
}

fn to_pg_arg(value: &Value, param_type: ParamType) -> PgArg {
    match (param_type, value) {
        (_, Value::Null) => PgArg::Null,
        (ParamType::Json, value) => PgArg::Json(value.clone()),
        (ParamType::Text, Value::Number(n)) => PgArg::Text(n.to_string()),
        (ParamType::Text, Value::Bool(b)) => PgArg::Text(b.to_string()),
        (ParamType::Numeric, Value::String(s)) => numeric_arg(s),
        (ParamType::Uuid, Value::String(s)) => {
            Uuid::parse_str(s).map_or_else(|_| PgArg::Text(s.clone()), PgArg::Uuid)
        }
        (_, Value::String(s)) => PgArg::Text(s.clone()),
        (_, Value::Number(n)) => number_arg(n),
        (_, Value::Bool(b)) => PgArg::Bool(*b),
        (_, other) => PgArg::Json(other.clone()),
    }
}

macro_rules! bind_pg_arg {
    ($query:expr, $arg:expr) => {
        match $arg {
            PgArg::Null => $query.bind(UntypedNull),
            PgArg::Text(s) => $query.bind(s),
            PgArg::Int(i) => $query.bind(i),
            PgArg::Float(f) => $query.bind(f),
            PgArg::Bool(b) => $query.bind(b),
            PgArg::Uuid(uuid) => $query.bind(uuid),
            PgArg::Json(value) => $query.bind(sqlx::types::Json(value)),
        }
    };
}

pub(crate) fn bind_args<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    statement: &Statement,
) -> Query<'q, Postgres, PgArguments> {
    for (index, arg) in statement.args.iter().enumerate() {
        query = bind_pg_arg!(query, to_pg_arg(arg, statement.param_type(index)));
    }
    query
}

fn bind_scalar_args<'q>(
    mut query: QueryScalar<'q, Postgres, Value, PgArguments>,
    statement: &Statement,
) -> QueryScalar<'q, Postgres, Value, PgArguments> {
    for (index, arg) in statement.args.iter().enumerate() {
        query = bind_pg_arg!(query, to_pg_arg(arg, statement.param_type(index)));
    }
    query
}

/// Wrap a SELECT so each row comes back as one JSON object
pub(crate) fn json_rows_sql(select: &str) -> String {
    format!("SELECT row_to_json(t) FROM ({}) t", select)
}

/// [`DatabaseExecutor`] backed by a sqlx connection pool
#[derive(Debug, Clone)]
pub struct PgExecutor {
    pub(crate) pool: PgPool,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseExecutor for PgExecutor {
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Value>, StoreError> {
        let sql = json_rows_sql(&statement.text);
        let query = bind_scalar_args(sqlx::query_scalar::<_, Value>(&sql), statement);

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, StoreError> {
        let result = bind_args(sqlx::query(&statement.text), statement)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn execute_guarded(
        &self,
        guard: &Statement,
        writes: &[Statement],
    ) -> Result<bool, StoreError> {
        self.run_guarded(guard, writes).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
