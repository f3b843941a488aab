//! HTTP error mapping
//!
//! Client errors keep their message and status; anything else is logged and
//! answered with a fixed 500 body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use store_object::errors::StoreError;
use store_object::validation::ValidationError;
use thiserror::Error;

pub const INTERNAL_ERROR_MESSAGE: &str = "an internal server error has occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Client { status: StatusCode, message: String },

    /// Details are logged, never sent
    #[error("an internal server error has occurred")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Client {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Client { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err.code().and_then(|code| StatusCode::from_u16(code).ok()) {
            Some(status) => ApiError::Client {
                status,
                message: err.to_string(),
            },
            None => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        StoreError::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
