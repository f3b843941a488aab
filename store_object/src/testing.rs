//! In-memory executor for exercising stores without a database

use crate::errors::StoreError;
use crate::query_builder::Statement;
use crate::traits::DatabaseExecutor;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

type ErrorFactory = Box<dyn Fn() -> StoreError + Send + Sync>;

/// Records every statement it receives and answers with canned results.
///
/// Reads return the configured rows, writes report `affected` rows and the
/// guard of a guarded write succeeds when `row_exists` is set.
pub struct RecordingExecutor {
    statements: Mutex<Vec<Statement>>,
    rows: Vec<Value>,
    affected: u64,
    row_exists: bool,
    failure: Option<ErrorFactory>,
}

impl Default for RecordingExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self {
            statements: Mutex::new(Vec::new()),
            rows: Vec::new(),
            affected: 1,
            row_exists: true,
            failure: None,
        }
    }

    pub fn with_rows(rows: Vec<Value>) -> Self {
        Self {
            rows,
            ..Self::new()
        }
    }

    pub fn affected_rows(mut self, affected: u64) -> Self {
        self.affected = affected;
        self
    }

    pub fn row_exists(mut self, exists: bool) -> Self {
        self.row_exists = exists;
        self
    }

    /// Fail every call with the error built by `factory`
    pub fn fail_with(mut self, factory: impl Fn() -> StoreError + Send + Sync + 'static) -> Self {
        self.failure = Some(Box::new(factory));
        self
    }

    /// Statements received so far, in order
    pub fn statements(&self) -> Vec<Statement> {
        self.statements
            .lock()
            .map(|statements| statements.clone())
            .unwrap_or_default()
    }

    fn record(&self, statement: &Statement) -> Result<(), StoreError> {
        let mut statements = self
            .statements
            .lock()
            .map_err(|_| StoreError::Internal("statement log poisoned".to_string()))?;
        statements.push(statement.clone());
        drop(statements);

        match &self.failure {
            Some(factory) => Err(factory()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DatabaseExecutor for RecordingExecutor {
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Value>, StoreError> {
        self.record(statement)?;
        Ok(self.rows.clone())
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, StoreError> {
        self.record(statement)?;
        Ok(self.affected)
    }

    async fn execute_guarded(
        &self,
        guard: &Statement,
        writes: &[Statement],
    ) -> Result<bool, StoreError> {
        self.record(guard)?;
        if !self.row_exists {
            return Ok(false);
        }
        for write in writes {
            self.record(write)?;
        }
        Ok(true)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(factory) => Err(factory()),
            None => Ok(()),
        }
    }
}
