//! Error types for commissioner management.

use agora_auth::AuthError;
use agora_database::DatabaseError;
use thiserror::Error;

pub type CommissionerResult<T> = Result<T, CommissionerError>;

#[derive(Debug, Error)]
pub enum CommissionerError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("Commissioner not found: {0}")]
    CommissionerNotFound(i64),

    #[error("Order not found: {0}")]
    OrderNotFound(i64),
}

impl CommissionerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }
}
