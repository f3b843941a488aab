//! Generic store implementations
//!
//! Assembles statements for each resource operation and hands them to the
//! executor. Errors from the builders or the executor are passed through
//! untouched.

use super::core::GenericStore;
use crate::errors::StoreError;
use crate::query_builder::{QueryBuilder, Statement, UpdateSet};
use crate::traits::StoreObject;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

fn log_statement(operation: &str, table: &str, statement: &Statement) {
    tracing::debug!(
        operation,
        table,
        sql = %statement.text,
        params = statement.args.len(),
        "assembled statement"
    );
}

#[async_trait]
impl StoreObject for GenericStore {
    async fn list(&self, query: QueryBuilder) -> Result<Vec<Value>, StoreError> {
        let statement = self.assembler().select(&query)?;
        log_statement("list", self.schema.table(), &statement);

        self.executor.fetch_all(&statement).await
    }

    async fn get_by_id(&self, id: Uuid, query: QueryBuilder) -> Result<Option<Value>, StoreError> {
        let statement = self.assembler().select_by_id(id, query)?;
        log_statement("get_by_id", self.schema.table(), &statement);

        let mut rows = self.executor.fetch_all(&statement).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows.swap_remove(0)))
    }

    async fn create(&self, body: IndexMap<String, Value>) -> Result<(), StoreError> {
        let statement = self.assembler().insert(&body);
        log_statement("create", self.schema.table(), &statement);

        self.executor.execute(&statement).await?;
        Ok(())
    }

    async fn replace(&self, id: Uuid, body: IndexMap<String, Value>) -> Result<(), StoreError> {
        let plan = self.assembler().replace(id, &body);
        log_statement("replace", self.schema.table(), &plan.guard);
        for write in &plan.writes {
            log_statement("replace", self.schema.table(), write);
        }

        let replaced = self
            .executor
            .execute_guarded(&plan.guard, &plan.writes)
            .await?;
        if !replaced {
            return Err(StoreError::not_found(
                self.schema.missing_row_message(&id.to_string()),
            ));
        }
        Ok(())
    }

    async fn patch(&self, id: Uuid, updates: UpdateSet) -> Result<(), StoreError> {
        let statement = self.assembler().patch(id, &updates);
        log_statement("patch", self.schema.table(), &statement);

        let affected = self.executor.execute(&statement).await?;
        if affected == 0 {
            return Err(StoreError::not_found(
                self.schema.missing_row_message(&id.to_string()),
            ));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let statement = self.assembler().delete(id);
        log_statement("delete", self.schema.table(), &statement);

        let affected = self.executor.execute(&statement).await?;
        Ok(affected > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.executor.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::QueryFilter;
    use crate::schema::moths_schema;
    use crate::testing::RecordingExecutor;
    use serde_json::json;
    use std::sync::Arc;

    const MOTH_ID: &str = "5f8b81be-7e6c-41f1-ba8f-c35d8d346509";

    fn store_with(executor: Arc<RecordingExecutor>) -> GenericStore {
        GenericStore::new(executor, moths_schema())
    }

    fn moth_id() -> Uuid {
        Uuid::parse_str(MOTH_ID).unwrap()
    }

    #[tokio::test]
    async fn test_list_runs_assembled_select() {
        let executor = Arc::new(RecordingExecutor::with_rows(vec![json!({"id": MOTH_ID})]));
        let store = store_with(executor.clone());

        let rows = store
            .list(QueryBuilder::new().filter(QueryFilter::new().eq("species", json!("luna"))))
            .await
            .unwrap();

        assert_eq!(rows, vec![json!({"id": MOTH_ID})]);
        let statements = executor.statements();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].text, "SELECT * FROM moths WHERE species = $1");
        assert_eq!(statements[0].args, vec![json!("luna")]);
    }

    #[tokio::test]
    async fn test_invalid_operator_never_reaches_executor() {
        let executor = Arc::new(RecordingExecutor::new());
        let store = store_with(executor.clone());

        let err = store
            .list(QueryBuilder::new().filter(QueryFilter::new().op("weight", "tim", json!(3))))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid filter operator for weight");
        assert!(executor.statements().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_returns_first_row() {
        let executor = Arc::new(RecordingExecutor::with_rows(vec![
            json!({"id": MOTH_ID, "species": "luna"}),
        ]));
        let store = store_with(executor.clone());

        let row = store.get_by_id(moth_id(), QueryBuilder::new()).await.unwrap();
        assert_eq!(row, Some(json!({"id": MOTH_ID, "species": "luna"})));
        assert_eq!(
            executor.statements()[0].text,
            "SELECT * FROM moths WHERE id = $1"
        );
    }

    #[tokio::test]
    async fn test_get_by_id_missing_row() {
        let store = store_with(Arc::new(RecordingExecutor::new()));
        let row = store.get_by_id(moth_id(), QueryBuilder::new()).await.unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn test_replace_missing_row_issues_no_writes() {
        let executor = Arc::new(RecordingExecutor::new().row_exists(false));
        let store = store_with(executor.clone());

        let mut body = IndexMap::new();
        body.insert("weight".to_string(), json!(3));
        let err = store.replace(moth_id(), body).await.unwrap_err();

        assert_eq!(err.code(), Some(404));
        assert_eq!(
            err.to_string(),
            format!("moth with id {} does not exist", MOTH_ID)
        );
        let statements = executor.statements();
        assert_eq!(statements.len(), 1);
        assert!(statements[0].text.starts_with("SELECT id FROM moths"));
    }

    #[tokio::test]
    async fn test_replace_existing_row_deletes_then_inserts() {
        let executor = Arc::new(RecordingExecutor::new().row_exists(true));
        let store = store_with(executor.clone());

        let mut body = IndexMap::new();
        body.insert("species".to_string(), json!("atlas"));
        store.replace(moth_id(), body).await.unwrap();

        let texts: Vec<String> = executor
            .statements()
            .into_iter()
            .map(|statement| statement.text)
            .collect();
        assert_eq!(
            texts,
            vec![
                "SELECT id FROM moths WHERE id = $1 FOR UPDATE".to_string(),
                "DELETE FROM moths WHERE id = $1".to_string(),
                "INSERT INTO moths (species, wingspan, weight, last_spotted) VALUES ($1, $2, $3, $4)"
                    .to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_patch_missing_row_is_not_found() {
        let executor = Arc::new(RecordingExecutor::new().affected_rows(0));
        let store = store_with(executor.clone());

        let err = store
            .patch(moth_id(), UpdateSet::set("weight", json!(2)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(404));
    }

    #[tokio::test]
    async fn test_patch_and_delete() {
        let executor = Arc::new(RecordingExecutor::new());
        let store = store_with(executor.clone());

        store
            .patch(moth_id(), UpdateSet::set("weight", json!(2)))
            .await
            .unwrap();
        assert!(store.delete(moth_id()).await.unwrap());

        let statements = executor.statements();
        assert_eq!(
            statements[0].text,
            "UPDATE moths SET weight = $1 WHERE id = $2"
        );
        assert_eq!(statements[0].args, vec![json!(2), json!(MOTH_ID)]);
        assert_eq!(statements[1].text, "DELETE FROM moths WHERE id = $1");
    }

    #[tokio::test]
    async fn test_executor_errors_pass_through() {
        let executor = Arc::new(
            RecordingExecutor::new().fail_with(|| StoreError::unprocessable("column \"x\" does not exist")),
        );
        let store = store_with(executor);

        let err = store.list(QueryBuilder::new()).await.unwrap_err();
        assert_eq!(err.code(), Some(422));
    }
}
