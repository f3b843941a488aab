//! Schema driven INSERT fragments

use crate::query_builder::params::Bindings;
use crate::schema::Schema;
use indexmap::IndexMap;
use serde_json::Value;

/// Column list and placeholder list of an INSERT, aligned with the bound args
#[derive(Debug, Clone, PartialEq)]
pub struct InsertParts {
    /// `"(c1, c2, ...)"`
    pub columns: String,
    /// `"($1, $2, ...)"`
    pub placeholders: String,
}

impl InsertParts {
    /// Build the fragments in schema order. Every schema column is bound:
    /// a field is bound as given when it is present and truthy, else as `null`.
    pub fn from_schema(
        body: &IndexMap<String, Value>,
        schema: &Schema,
        bindings: &mut Bindings,
    ) -> Self {
        let mut columns = Vec::with_capacity(schema.len());
        let mut placeholders = Vec::with_capacity(schema.len());

        for key in schema.keys() {
            let value = match body.get(key) {
                Some(value) if is_truthy(value) => value.clone(),
                _ => Value::Null,
            };
            columns.push(key);
            placeholders.push(bindings.push_for(key, value));
        }

        Self {
            columns: format!("({})", columns.join(", ")),
            placeholders: format!("({})", placeholders.join(", ")),
        }
    }
}

/// `null`, `false`, zero and the empty string are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
