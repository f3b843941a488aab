//! Trait definitions
//!
//! This module defines the resource operations exposed to request handlers.

use crate::errors::StoreError;
use crate::query_builder::{QueryBuilder, UpdateSet};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

/// CRUD operations over one schema-backed table.
///
/// Inputs are expected to be validated already; rows come back as JSON objects.
#[async_trait]
pub trait StoreObject: Send + Sync {
    /// List rows matching the query
    async fn list(&self, query: QueryBuilder) -> Result<Vec<Value>, StoreError>;

    /// Fetch one row; the query's filters, fields and ordering still apply
    async fn get_by_id(&self, id: Uuid, query: QueryBuilder) -> Result<Option<Value>, StoreError>;

    /// Insert a row populated in schema order
    async fn create(&self, body: IndexMap<String, Value>) -> Result<(), StoreError>;

    /// Replace an existing row. Fails with a 404 client error when it is missing.
    async fn replace(&self, id: Uuid, body: IndexMap<String, Value>) -> Result<(), StoreError>;

    /// Partially update an existing row. Fails with a 404 client error when it is missing.
    async fn patch(&self, id: Uuid, updates: UpdateSet) -> Result<(), StoreError>;

    /// Delete a row, returning whether anything was removed
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Check the backing database is reachable
    async fn health_check(&self) -> Result<(), StoreError>;
}
