use crate::errors::StoreError;
use crate::query_builder::Statement;
use async_trait::async_trait;
use serde_json::Value;

/// Runs assembled statements against a database
#[async_trait]
pub trait DatabaseExecutor: Send + Sync {
    /// Run a SELECT and return every row as a JSON object
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Value>, StoreError>;

    /// Run a write and return the number of affected rows
    async fn execute(&self, statement: &Statement) -> Result<u64, StoreError>;

    /// Run `guard` and then `writes` inside one transaction.
    ///
    /// When `guard` returns no row the transaction is rolled back, none of
    /// `writes` is sent, and `false` is returned.
    async fn execute_guarded(
        &self,
        guard: &Statement,
        writes: &[Statement],
    ) -> Result<bool, StoreError>;

    /// Round trip to the database
    async fn ping(&self) -> Result<(), StoreError>;
}
