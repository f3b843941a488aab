//! Sort order parsing and rendering

use crate::query_builder::params::OneOrMany;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// One `field direction` pair of an ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTerm {
    pub field: String,
    pub order: SortOrder,
}

impl OrderTerm {
    /// `-field` sorts descending, `+field` and `field` ascending
    pub fn parse(entry: &str) -> Self {
        let (field, order) = if let Some(field) = entry.strip_prefix('-') {
            (field, SortOrder::Desc)
        } else if let Some(field) = entry.strip_prefix('+') {
            (field, SortOrder::Asc)
        } else {
            (entry, SortOrder::Asc)
        };

        Self {
            field: field.to_string(),
            order,
        }
    }
}

/// Ordered list of sort terms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBy {
    terms: Vec<OrderTerm>,
}

impl OrderBy {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn push(mut self, field: &str, order: SortOrder) -> Self {
        self.terms.push(OrderTerm {
            field: field.to_string(),
            order,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// `" ORDER BY f1 d1, f2 d2"`, or an empty string when unsorted
    pub fn to_sql(&self) -> String {
        if self.terms.is_empty() {
            return String::new();
        }

        let terms: Vec<String> = self
            .terms
            .iter()
            .map(|term| format!("{} {}", term.field, term.order.to_sql()))
            .collect();

        format!(" ORDER BY {}", terms.join(", "))
    }
}

impl From<&OneOrMany> for OrderBy {
    fn from(entries: &OneOrMany) -> Self {
        Self {
            terms: entries
                .as_slice()
                .iter()
                .map(|entry| OrderTerm::parse(entry))
                .collect(),
        }
    }
}

impl From<Option<OneOrMany>> for OrderBy {
    fn from(entries: Option<OneOrMany>) -> Self {
        entries
            .as_ref()
            .map(OrderBy::from)
            .unwrap_or_default()
    }
}
