//! Statement assembly
//!
//! Turns validated request input into complete statements for one table.
//! Each statement owns a fresh [`Bindings`] counter that every fragment
//! appends to, so placeholder numbers always match argument positions.
//! Every statement leaves here with its argument types resolved from the
//! schema.

use crate::errors::StoreError;
use crate::query_builder::builder::QueryBuilder;
use crate::query_builder::insert::InsertParts;
use crate::query_builder::params::Bindings;
use crate::query_builder::statement::Statement;
use crate::query_builder::update::UpdateSet;
use crate::schema::Schema;
use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

/// Statements that together replace one row
#[derive(Debug, Clone, PartialEq)]
pub struct ReplacePlan {
    /// Locks the row and proves it exists
    pub guard: Statement,
    /// Delete followed by the fresh insert
    pub writes: Vec<Statement>,
}

#[derive(Debug, Clone, Copy)]
pub struct QueryAssembler<'a> {
    schema: &'a Schema,
}

impl<'a> QueryAssembler<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// List read
    pub fn select(&self, query: &QueryBuilder) -> Result<Statement, StoreError> {
        Ok(query.build_select(self.schema.table())?.typed(self.schema))
    }

    /// Single-record read: the id becomes one more equality filter
    pub fn select_by_id(&self, id: Uuid, query: QueryBuilder) -> Result<Statement, StoreError> {
        let query = query.filter_eq(Schema::ID_FIELD, id_value(id));
        self.select(&query)
    }

    /// `INSERT INTO <table> (cols) VALUES ($1, ...)` in schema order
    pub fn insert(&self, body: &IndexMap<String, Value>) -> Statement {
        let mut bindings = Bindings::new();
        let parts = InsertParts::from_schema(body, self.schema, &mut bindings);

        let text = format!(
            "INSERT INTO {} {} VALUES {}",
            self.schema.table(),
            parts.columns,
            parts.placeholders
        );
        Statement::new(text, bindings).typed(self.schema)
    }

    /// `UPDATE <table> SET ... WHERE id = $n` with the id bound last
    pub fn patch(&self, id: Uuid, updates: &UpdateSet) -> Statement {
        let mut bindings = Bindings::new();
        let set_clause = updates.to_sql(&mut bindings);
        let id_param = bindings.push_for(Schema::ID_FIELD, id_value(id));

        let text = format!(
            "UPDATE {}{} WHERE {} = {}",
            self.schema.table(),
            set_clause,
            Schema::ID_FIELD,
            id_param
        );
        Statement::new(text, bindings).typed(self.schema)
    }

    pub fn delete(&self, id: Uuid) -> Statement {
        self.by_id(format!("DELETE FROM {}", self.schema.table()), id)
    }

    /// Existence check that also locks the row for the rest of the transaction
    pub fn lock_by_id(&self, id: Uuid) -> Statement {
        let mut statement = self.by_id(
            format!("SELECT {} FROM {}", Schema::ID_FIELD, self.schema.table()),
            id,
        );
        statement.text.push_str(" FOR UPDATE");
        statement
    }

    /// Full replace: lock + delete + schema insert, meant to run atomically
    pub fn replace(&self, id: Uuid, body: &IndexMap<String, Value>) -> ReplacePlan {
        ReplacePlan {
            guard: self.lock_by_id(id),
            writes: vec![self.delete(id), self.insert(body)],
        }
    }

    fn by_id(&self, prefix: String, id: Uuid) -> Statement {
        let mut bindings = Bindings::new();
        let param = bindings.push_for(Schema::ID_FIELD, id_value(id));
        Statement::new(
            format!("{} WHERE {} = {}", prefix, Schema::ID_FIELD, param),
            bindings,
        )
        .typed(self.schema)
    }
}

fn id_value(id: Uuid) -> Value {
    Value::String(id.to_string())
}
