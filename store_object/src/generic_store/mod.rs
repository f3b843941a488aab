pub mod core;
pub mod postgres;
pub mod store_object;
pub mod transaction;

pub use core::GenericStore;
pub use postgres::PgExecutor;
