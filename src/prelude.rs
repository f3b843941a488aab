//! Convenience re-exports for common MothHaus usage
//!
//! # Example
//!
//! ```rust
//! use mothhaus::prelude::*;
//!
//! let schema = moths_schema();
//! assert_eq!(schema.table(), "moths");
//! ```

// Core MothHaus components
pub use crate::core::MothHaus;
pub use crate::errors::MothHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, LoggingConfig, ServerConfig};

// Re-export commonly used store-object types for convenience
pub use store_object::prelude::*;

// Re-export store_object module
pub use store_object;

// Common external dependencies
pub use anyhow;
pub use serde_json::json;
pub use sqlx;
pub use tokio;

// Commonly used sqlx types
pub use sqlx::{PgPool, Postgres, Transaction};
