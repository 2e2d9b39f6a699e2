//! Repository for client data access operations.

use sqlx::SqlitePool;
use tracing::info;

use crate::entities::{Client, CreateClientRequest};
use crate::types::{now_timestamp, DatabaseResult};

/// Repository for client database operations
#[derive(Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateClientRequest) -> DatabaseResult<Client> {
        let now = now_timestamp();

        let id = sqlx::query("INSERT INTO clients (name, email, created_at) VALUES (?, ?, ?)")
            .bind(&request.name)
            .bind(&request.email)
            .bind(&now)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        info!(client_id = id, "created client");

        Ok(Client {
            id,
            name: request.name.clone(),
            email: request.email.clone(),
            created_at: now,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, created_at FROM clients WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn list(&self) -> DatabaseResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, created_at FROM clients ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Ids of every commissioner delegated by the client.
    pub async fn commissioner_ids(&self, client_id: i64) -> DatabaseResult<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM commissioners WHERE client_id = ? ORDER BY id ASC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
