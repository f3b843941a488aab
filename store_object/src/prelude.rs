//! Convenience re-exports for common store-object usage

// Core traits
pub use crate::traits::{DatabaseExecutor, StoreObject};

// Error types
pub use crate::errors::StoreError;

// Core store functionality
pub use crate::generic_store::{GenericStore, PgExecutor};

// Resource description
pub use crate::schema::{moths_schema, FieldRule, Schema};

// Validation
pub use crate::validation::{
    parse_id, validate_body, validate_column, validate_query_value, ValidationError,
};

// Query building
pub use crate::query_builder::{
    FieldSelection, OneOrMany, OrderBy, Pagination, ParamType, QueryBuilder, QueryFilter,
    SortOrder, UpdateSet,
};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use indexmap::IndexMap;
pub use serde_json::Value;
pub use uuid::Uuid;
