//! Error types for the chat system.

use agora_database::DatabaseError;
use thiserror::Error;

/// Result type alias for chat operations
pub type ChatResult<T> = Result<T, ChatError>;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Chat not found: {id}")]
    ChatNotFound { id: i64 },

    #[error("Access denied: {reason}")]
    AccessDenied { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl ChatError {
    pub fn chat_not_found(id: i64) -> Self {
        Self::ChatNotFound { id }
    }

    pub fn access_denied(reason: impl Into<String>) -> Self {
        Self::AccessDenied {
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
