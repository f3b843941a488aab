use std::sync::Arc;
use store_object::schema::Schema;
use store_object::traits::StoreObject;

/// Shared handler state: the resource store and the schema requests are checked against
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StoreObject>,
    pub schema: Arc<Schema>,
}

impl AppState {
    pub fn new(store: Arc<dyn StoreObject>, schema: Schema) -> Self {
        Self {
            store,
            schema: Arc::new(schema),
        }
    }
}
