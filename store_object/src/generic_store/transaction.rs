//! Transaction support for the PostgreSQL executor
//!
//! A guarded transaction runs one statement that must return a row before
//! any of the following writes are sent. Either every write commits or none
//! of them does.

use super::postgres::{bind_args, PgExecutor};
use crate::errors::StoreError;
use crate::query_builder::Statement;

impl PgExecutor {
    pub(crate) async fn run_guarded(
        &self,
        guard: &Statement,
        writes: &[Statement],
    ) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let locked = bind_args(sqlx::query(&guard.text), guard)
            .fetch_optional(&mut *tx)
            .await?;

        if locked.is_none() {
            tx.rollback().await?;
            tracing::debug!(sql = %guard.text, "guard matched no row, transaction rolled back");
            return Ok(false);
        }

        for write in writes {
            bind_args(sqlx::query(&write.text), write)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }
}
