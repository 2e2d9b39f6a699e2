//! Error types for the database layer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database query error: {0}")]
    QueryError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => Self::NotFound("row not found".to_string()),
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                Self::Duplicate(db_error.message().to_string())
            }
            sqlx::Error::Database(db_error) if db_error.is_foreign_key_violation() => {
                Self::ForeignKey(db_error.message().to_string())
            }
            _ => Self::QueryError(error.to_string()),
        }
    }
}
