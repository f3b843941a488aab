//! Comparison filters
//!
//! Filters arrive as an ordered map of field name to either a bare value
//! (equality) or a map of operator name to value. Order matters: it decides
//! placeholder numbering.

use crate::errors::StoreError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Supported comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperator {
    Eq,  // =
    Gt,  // >
    Gte, // >=
    Lt,  // <
    Lte, // <=
}

impl QueryOperator {
    /// Parse the operator name used in requests (`=`, `gt`, `gte`, `lt`, `lte`)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "=" => Some(QueryOperator::Eq),
            "gt" => Some(QueryOperator::Gt),
            "gte" => Some(QueryOperator::Gte),
            "lt" => Some(QueryOperator::Lt),
            "lte" => Some(QueryOperator::Lte),
            _ => None,
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            QueryOperator::Eq => "=",
            QueryOperator::Gt => ">",
            QueryOperator::Gte => ">=",
            QueryOperator::Lt => "<",
            QueryOperator::Lte => "<=",
        }
    }
}

/// Single resolved condition in a WHERE clause
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCondition {
    pub field: String,
    pub operator: QueryOperator,
    pub value: Value,
}

/// Value side of one filter entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Operator name to value, in request order
    Operators(IndexMap<String, Value>),
    /// Bare value, compared for equality
    Scalar(Value),
}

/// Ordered set of filters for one statement
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct QueryFilter {
    entries: IndexMap<String, FilterValue>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Equality filter on `field`
    pub fn eq(mut self, field: &str, value: Value) -> Self {
        self.entries
            .insert(field.to_string(), FilterValue::Scalar(value));
        self
    }

    /// Filter on `field` with an operator given by name.
    /// Unknown names are kept and rejected when conditions are resolved.
    pub fn op(mut self, field: &str, operator: &str, value: Value) -> Self {
        match self.entries.get_mut(field) {
            Some(FilterValue::Operators(operators)) => {
                operators.insert(operator.to_string(), value);
            }
            _ => {
                let mut operators = IndexMap::new();
                operators.insert(operator.to_string(), value);
                self.entries
                    .insert(field.to_string(), FilterValue::Operators(operators));
            }
        }
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FilterValue) {
        self.entries.insert(field.into(), value);
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every (field, operator, value) triple in enumeration order
    pub fn conditions(&self) -> Result<Vec<QueryCondition>, StoreError> {
        let mut conditions = Vec::new();

        for (field, filter_value) in &self.entries {
            match filter_value {
                FilterValue::Scalar(value) => conditions.push(QueryCondition {
                    field: field.clone(),
                    operator: QueryOperator::Eq,
                    value: value.clone(),
                }),
                FilterValue::Operators(operators) => {
                    for (name, value) in operators {
                        let operator = QueryOperator::parse(name).ok_or_else(|| {
                            StoreError::validation(format!(
                                "Invalid filter operator for {}",
                                field
                            ))
                        })?;
                        conditions.push(QueryCondition {
                            field: field.clone(),
                            operator,
                            value: value.clone(),
                        });
                    }
                }
            }
        }

        Ok(conditions)
    }
}
