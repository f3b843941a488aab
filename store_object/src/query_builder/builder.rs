//! Query builder for list reads
//!
//! Collects the caller's field selection, filters, sort order and
//! pagination for one SELECT.

use crate::errors::StoreError;
use crate::query_builder::fields::FieldSelection;
use crate::query_builder::filter::{FilterValue, QueryFilter};
use crate::query_builder::ordering::OrderBy;
use crate::query_builder::pagination::Pagination;
use crate::query_builder::params::Bindings;
use crate::query_builder::sql_generation::SqlGenerator;
use crate::query_builder::statement::Statement;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    pub(crate) fields: FieldSelection,
    pub(crate) filter: QueryFilter,
    pub(crate) order_by: OrderBy,
    pub(crate) pagination: Pagination,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(mut self, fields: FieldSelection) -> Self {
        self.fields = fields;
        self
    }

    /// Replace the filter set
    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Add one equality condition after the existing ones
    pub fn filter_eq(mut self, field: &str, value: Value) -> Self {
        self.filter.insert(field, FilterValue::Scalar(value));
        self
    }

    pub fn order(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.pagination = self.pagination.with_limit(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.pagination = self.pagination.with_offset(offset);
        self
    }

    /// `SELECT <fields> FROM <table> <where> <order> <page>`
    pub fn build_select(&self, table: &str) -> Result<Statement, StoreError> {
        let mut bindings = Bindings::new();
        let where_clause = SqlGenerator::build_where_clause(&self.filter, &mut bindings)?;

        let mut text = String::from("SELECT");
        text.push_str(&self.fields.to_sql());
        text.push_str(" FROM ");
        text.push_str(table);
        text.push_str(&where_clause);
        text.push_str(&self.order_by.to_sql());
        text.push_str(&self.pagination.to_sql());

        Ok(Statement::new(text, bindings))
    }
}
