//! Error types for the users service

use std::time::Duration;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::MIN_PASSWORD_LENGTH;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid password: must be at least {} characters", MIN_PASSWORD_LENGTH)]
    InvalidPassword,

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid request body: {0}")]
    InvalidPayload(String),

    #[error("User not found")]
    NotFound,

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Storage failures pass through untouched
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl UserError {
    /// True for errors the caller can fix by changing the request
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            UserError::InvalidEmail
                | UserError::InvalidPassword
                | UserError::InvalidDocument(_)
                | UserError::InvalidPayload(_)
        )
    }
}

impl From<JsonRejection> for UserError {
    fn from(rejection: JsonRejection) -> Self {
        UserError::InvalidPayload(rejection.body_text())
    }
}

pub type UserResult<T> = Result<T, UserError>;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = match &self {
            UserError::InvalidEmail
            | UserError::InvalidPassword
            | UserError::InvalidDocument(_)
            | UserError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            UserError::NotFound => StatusCode::NOT_FOUND,
            UserError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
            UserError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            UserError::PasswordHash(_) | UserError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            UserError::Database(DatabaseError::UniqueViolation(_)) => {
                "User with this email already exists".to_string()
            }
            UserError::PasswordHash(_) | UserError::Database(_) => {
                error!("Internal error: {}", self);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
