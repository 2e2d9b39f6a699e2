//! Agora Database Crate
//!
//! This crate owns the sqlite connection pool, the embedded migrations, and the
//! repositories used by the chat and commissioner services. The pool is created
//! once at startup and handed to every repository explicitly.

use sqlx::SqlitePool;
use agora_config::DatabaseConfig;

pub mod connection;
pub mod migrations;
pub mod repos;
pub mod entities;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

// Re-export repositories
pub use repos::{
    ChatRepository, ClientRepository, CommissionerRepository, EmployeeRepository,
    MessageRepository, OrderRepository, ServiceItemRepository,
};

// Re-export entities
pub use entities::{
    chat::{Chat, ChatSummary, CreateChatRequest, PartyContact},
    client::{Client, CreateClientRequest},
    commissioner::{Commissioner, CreateCommissionerRequest, UpdateCommissionerRequest},
    employee::{CreateEmployeeRequest, Employee},
    message::{ChatMessage, CreateMessageRequest},
    order::{CreateOrderRequest, Order, OrderWithCommissioners},
    service_item::ServiceItem,
};

// Re-export types
pub use types::{errors::DatabaseError, now_timestamp, DatabaseResult};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(pool)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::TempDir;

    pub async fn create_test_database() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 1,
        };

        let pool = initialize_database(&config).await.unwrap();
        (pool, temp_dir)
    }
}
