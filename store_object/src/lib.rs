//! Store Object - Core database abstraction layer for MothHaus
//!
//! This crate provides the resource schema, the query builders that turn
//! validated request input into parameterized SQL, and the stores that run
//! those statements.

pub mod errors;
pub mod generic_store;
pub mod prelude;
pub mod query_builder;
pub mod schema;
pub mod traits;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use errors::StoreError;
pub use generic_store::{GenericStore, PgExecutor};
pub use query_builder::{QueryBuilder, QueryFilter, QueryOperator, SortOrder, Statement, UpdateSet};
pub use schema::{moths_schema, FieldRule, Schema, SchemaField};
pub use traits::*;
pub use validation::ValidationError;

use sqlx::PgPool;

pub type DbPool = PgPool;
