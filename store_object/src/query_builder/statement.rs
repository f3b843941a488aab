use crate::query_builder::params::Bindings;
use crate::schema::Schema;
use serde_json::Value;

/// SQL type an argument is sent as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamType {
    /// No known column: strings go out as text, numbers as numbers
    #[default]
    Untyped,
    Text,
    Numeric,
    Json,
    Uuid,
}

/// SQL text plus the positional arguments its `$n` placeholders refer to
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub text: String,
    pub args: Vec<Value>,
    /// Column each argument belongs to, aligned with `args`
    pub columns: Vec<Option<String>>,
    /// Aligned with `args`; filled from a schema by [`Statement::typed`]
    pub types: Vec<ParamType>,
}

impl Statement {
    pub fn new(text: impl Into<String>, bindings: Bindings) -> Self {
        let (args, columns) = bindings.into_parts();
        Self {
            text: text.into(),
            types: vec![ParamType::Untyped; args.len()],
            args,
            columns,
        }
    }

    /// Statement without placeholders
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            args: Vec::new(),
            columns: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Resolve every argument's type from the column it belongs to
    pub fn typed(mut self, schema: &Schema) -> Self {
        self.types = self
            .columns
            .iter()
            .map(|column| {
                column
                    .as_deref()
                    .map_or(ParamType::Untyped, |column| schema.param_type(column))
            })
            .collect();
        self
    }

    /// Type of the argument at `index`
    pub fn param_type(&self, index: usize) -> ParamType {
        self.types.get(index).copied().unwrap_or_default()
    }

    /// Highest `$n` index appearing in the text
    pub fn max_placeholder(&self) -> usize {
        let mut max = 0;
        let mut chars = self.text.char_indices().peekable();

        while let Some((start, ch)) = chars.next() {
            if ch != '$' {
                continue;
            }
            let digits_start = start + 1;
            let mut digits_end = digits_start;
            while let Some(&(idx, next)) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                digits_end = idx + next.len_utf8();
                chars.next();
            }
            if let Ok(n) = self.text[digits_start..digits_end].parse::<usize>() {
                max = max.max(n);
            }
        }

        max
    }
}
