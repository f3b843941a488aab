//! Error types for the MothHaus crate
//!
//! This module contains all error types that can be returned by MothHaus operations.

use store_object::errors::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MothHausError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
