use crate::errors::StoreError;
use crate::query_builder::params::Bindings;
use indexmap::IndexMap;
use serde_json::Value;

/// Non-empty, ordered set of column assignments for a partial update
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSet {
    assignments: IndexMap<String, Value>,
}

impl UpdateSet {
    /// Fails when there is nothing to update
    pub fn new(assignments: IndexMap<String, Value>) -> Result<Self, StoreError> {
        if assignments.is_empty() {
            return Err(StoreError::validation(
                "At least one field must be specified",
            ));
        }

        Ok(Self { assignments })
    }

    /// Start from a single assignment
    pub fn set(field: impl Into<String>, value: Value) -> Self {
        let mut assignments = IndexMap::new();
        assignments.insert(field.into(), value);
        Self { assignments }
    }

    /// Add another assignment, replacing an earlier one for the same field
    pub fn and_set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.assignments.insert(field.into(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.assignments.keys().map(String::as_str)
    }

    /// `" SET f1 = $n, f2 = $n+1"`, binding values on the shared counter
    pub fn to_sql(&self, bindings: &mut Bindings) -> String {
        let assignments: Vec<String> = self
            .assignments
            .iter()
            .map(|(field, value)| format!("{} = {}", field, bindings.push_for(field, value.clone())))
            .collect();

        format!(" SET {}", assignments.join(", "))
    }
}
