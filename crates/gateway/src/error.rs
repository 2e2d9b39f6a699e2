//! Error types for the gateway layer

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use agora_auth::AuthError;
use agora_chats::ChatError;
use agora_clients::CommissionerError;
use agora_database::DatabaseError;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            GatewayError::AuthorizationFailed(_) => StatusCode::FORBIDDEN,
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::InternalError(_) | GatewayError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = json!({
            "error": status.as_str(),
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<DatabaseError> for GatewayError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(msg) => GatewayError::NotFound(msg),
            other => GatewayError::DatabaseError(other.to_string()),
        }
    }
}

impl From<AuthError> for GatewayError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => {
                GatewayError::AuthenticationFailed("Invalid credentials".to_string())
            }
            AuthError::MissingToken | AuthError::InvalidToken(_) | AuthError::UnknownRole(_) => {
                GatewayError::AuthenticationFailed(error.to_string())
            }
            AuthError::TokenCreation(_) | AuthError::PasswordHash(_) => {
                GatewayError::InternalError(error.to_string())
            }
        }
    }
}

impl From<ChatError> for GatewayError {
    fn from(error: ChatError) -> Self {
        match error {
            ChatError::ChatNotFound { .. } => GatewayError::NotFound(error.to_string()),
            ChatError::AccessDenied { reason } => GatewayError::AuthorizationFailed(reason),
            ChatError::Validation { message } => GatewayError::InvalidRequest(message),
            ChatError::Database(err) => err.into(),
        }
    }
}

impl From<CommissionerError> for GatewayError {
    fn from(error: CommissionerError) -> Self {
        match error {
            CommissionerError::Validation(msg) => GatewayError::InvalidRequest(msg),
            CommissionerError::InvalidCredentials => {
                GatewayError::AuthenticationFailed("Invalid credentials".to_string())
            }
            CommissionerError::Forbidden(msg) => GatewayError::AuthorizationFailed(msg),
            CommissionerError::CommissionerNotFound(_) | CommissionerError::OrderNotFound(_) => {
                GatewayError::NotFound(error.to_string())
            }
            CommissionerError::Auth(err) => err.into(),
            CommissionerError::Database(err) => err.into(),
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_status_codes() {
        let cases: Vec<(GatewayError, StatusCode)> = vec![
            (ChatError::chat_not_found(3).into(), StatusCode::NOT_FOUND),
            (ChatError::access_denied("no").into(), StatusCode::FORBIDDEN),
            (ChatError::validation("blank").into(), StatusCode::BAD_REQUEST),
            (CommissionerError::InvalidCredentials.into(), StatusCode::UNAUTHORIZED),
            (CommissionerError::forbidden("not yours").into(), StatusCode::FORBIDDEN),
            (CommissionerError::OrderNotFound(1).into(), StatusCode::NOT_FOUND),
            (AuthError::MissingToken.into(), StatusCode::UNAUTHORIZED),
            (
                DatabaseError::QueryError("boom".to_string()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{error}");
        }
    }
}
