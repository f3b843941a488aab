//! Database migration functionality
//!
//! Creates the tables described by a [`Schema`] when they are missing.

use crate::core::MothHaus;
use crate::errors::MothHausError;
use store_object::schema::Schema;

impl MothHaus {
    /// Create the table for `schema` if it does not exist yet.
    /// Existing tables are left untouched.
    pub async fn auto_migrate(&self, schema: &Schema) -> Result<(), MothHausError> {
        let create_table_sql = schema.create_table_sql();
        tracing::info!(table = schema.table(), "ensuring table exists");
        tracing::debug!(sql = %create_table_sql, "creating table");
        sqlx::query(&create_table_sql).execute(self.pool()).await?;

        Ok(())
    }
}
