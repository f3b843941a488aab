use thiserror::Error;

/// SQLSTATE for a reference to a column that does not exist
const UNDEFINED_COLUMN: &str = "42703";
/// SQLSTATE for a value the column type cannot parse
const INVALID_TEXT_REPRESENTATION: &str = "22P02";
/// SQLSTATE for a comparison between a column and an incompatible argument
const UNDEFINED_FUNCTION: &str = "42883";

#[derive(Error, Debug)]
pub enum StoreError {
    /// General 4xx condition carrying its own status code
    #[error("{message}")]
    Client { message: String, code: u16 },

    /// Input shape or operator failure (400, or 422 when the database rejects it)
    #[error("{message}")]
    Validation { message: String, code: u16 },

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Client error with the default 400 status
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
            code: 400,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
            code: 404,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: 400,
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: 422,
        }
    }

    /// Status code for errors meant to reach the caller as-is.
    /// `None` means the failure is unexpected and must not leak.
    pub fn code(&self) -> Option<u16> {
        match self {
            StoreError::Client { code, .. } | StoreError::Validation { code, .. } => Some(*code),
            StoreError::Database(_) | StoreError::Internal(_) => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            match db_err.code().as_deref() {
                Some(UNDEFINED_COLUMN | INVALID_TEXT_REPRESENTATION | UNDEFINED_FUNCTION) => {
                    return StoreError::unprocessable(db_err.message().to_string());
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}
