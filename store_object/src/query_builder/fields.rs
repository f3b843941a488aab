//! Column selection for SELECT statements

use crate::query_builder::params::OneOrMany;

/// Columns to return; empty selects every column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSelection {
    fields: Vec<String>,
}

impl FieldSelection {
    pub fn all() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Selected-columns fragment, e.g. `" weight, species"` or `" *"`
    pub fn to_sql(&self) -> String {
        if self.fields.is_empty() {
            return " *".to_string();
        }

        format!(" {}", self.fields.join(", "))
    }
}

impl From<Option<OneOrMany>> for FieldSelection {
    fn from(fields: Option<OneOrMany>) -> Self {
        fields
            .map(|fields| Self::new(fields.into_vec()))
            .unwrap_or_default()
    }
}

impl From<OneOrMany> for FieldSelection {
    fn from(fields: OneOrMany) -> Self {
        Self::new(fields.into_vec())
    }
}
