//! Traits for database operations
//!
//! `StoreObject` is what request handlers talk to; `DatabaseExecutor` is what
//! stores hand their assembled statements to.

pub mod core;
pub mod executor;

pub use core::StoreObject;
pub use executor::DatabaseExecutor;
