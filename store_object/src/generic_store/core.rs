use crate::query_builder::QueryAssembler;
use crate::schema::Schema;
use crate::traits::DatabaseExecutor;
use std::sync::Arc;

/// Generic store serving one schema-backed table through any executor
#[derive(Clone)]
pub struct GenericStore {
    pub(crate) executor: Arc<dyn DatabaseExecutor>,
    pub(crate) schema: Arc<Schema>,
}

impl std::fmt::Debug for GenericStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericStore")
            .field("table", &self.schema.table())
            .field("columns", &self.schema.len())
            .finish()
    }
}

impl GenericStore {
    pub fn new(executor: Arc<dyn DatabaseExecutor>, schema: Schema) -> Self {
        Self {
            executor,
            schema: Arc::new(schema),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub(crate) fn assembler(&self) -> QueryAssembler<'_> {
        QueryAssembler::new(&self.schema)
    }
}
