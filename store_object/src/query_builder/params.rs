//! Positional parameters shared by every fragment of one statement

use serde::Deserialize;
use serde_json::Value;

/// Running placeholder counter and the arguments bound so far.
///
/// The next placeholder is always `$<len + 1>`, so the text produced through
/// [`Bindings::push`] and the argument list can never drift apart. Each
/// argument also remembers the column it is written to or compared with,
/// which decides the SQL type it is sent as.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: Vec<Value>,
    columns: Vec<Option<String>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Bind a value that belongs to no particular column
    pub fn push(&mut self, value: Value) -> String {
        self.bind(None, value)
    }

    /// Bind a value written to or compared with `column`
    pub fn push_for(&mut self, column: &str, value: Value) -> String {
        self.bind(Some(column.to_string()), value)
    }

    fn bind(&mut self, column: Option<String>, value: Value) -> String {
        self.values.push(value);
        self.columns.push(column);
        format!("${}", self.values.len())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn columns(&self) -> &[Option<String>] {
        &self.columns
    }

    /// Arguments and their columns, position for position
    pub fn into_parts(self) -> (Vec<Value>, Vec<Option<String>>) {
        (self.values, self.columns)
    }
}

/// A single string or an ordered list of strings, as accepted for
/// `fields` and `sort`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(values: Vec<String>) -> Self {
        OneOrMany::Many(values)
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(values: Vec<&str>) -> Self {
        OneOrMany::Many(values.into_iter().map(str::to_string).collect())
    }
}
